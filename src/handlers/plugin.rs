// handlers/plugin.rs
// Plugin handshake and capability handlers

use crate::models::{ActivateResponse, CapabilitiesResponse};
use crate::utils::success_response;
use crate::volume::VolumeDriver;
use warp::{Rejection, Reply};

pub const VOLUME_DRIVER_INTERFACE: &str = "VolumeDriver";

pub async fn activate_handler() -> Result<impl Reply, Rejection> {
    Ok(success_response(ActivateResponse {
        implements: vec![VOLUME_DRIVER_INTERFACE.to_string()],
    }))
}

pub async fn capabilities_handler(driver: VolumeDriver) -> Result<impl Reply, Rejection> {
    Ok(success_response(CapabilitiesResponse {
        capabilities: driver.capabilities(),
    }))
}
