// handlers/volumes.rs
// Volume lifecycle handlers: create, get, list, remove, path, mount, unmount

use crate::models::{
    CreateRequest, EmptyResponse, GetResponse, ListResponse, MountRequest, MountpointResponse,
    NameRequest,
};
use crate::utils::{error_response, run_blocking, success_response};
use crate::volume::VolumeDriver;
use tracing::{debug, warn};
use warp::{Rejection, Reply};

pub async fn create_volume_handler(
    body: CreateRequest,
    driver: VolumeDriver,
) -> Result<impl Reply, Rejection> {
    let CreateRequest { name, opts } = body;
    let options = opts.unwrap_or_default();

    match run_blocking(move || driver.create(&name, &options)).await {
        Ok(()) => Ok(success_response(EmptyResponse::default())),
        Err(e) => {
            warn!(error = %e, "create failed");
            Ok(error_response(&e.to_string()))
        }
    }
}

pub async fn get_volume_handler(
    body: NameRequest,
    driver: VolumeDriver,
) -> Result<impl Reply, Rejection> {
    match run_blocking(move || driver.get(&body.name)).await {
        Ok(volume) => Ok(success_response(GetResponse { volume })),
        Err(e) => Ok(error_response(&e.to_string())),
    }
}

pub async fn list_volumes_handler(driver: VolumeDriver) -> Result<impl Reply, Rejection> {
    match run_blocking(move || driver.list()).await {
        Ok(volumes) => Ok(success_response(ListResponse { volumes })),
        Err(e) => {
            warn!(error = %e, "list failed");
            Ok(error_response(&e.to_string()))
        }
    }
}

pub async fn remove_volume_handler(
    body: NameRequest,
    driver: VolumeDriver,
) -> Result<impl Reply, Rejection> {
    match run_blocking(move || driver.remove(&body.name)).await {
        Ok(()) => Ok(success_response(EmptyResponse::default())),
        Err(e) => {
            warn!(error = %e, "remove failed");
            Ok(error_response(&e.to_string()))
        }
    }
}

pub async fn volume_path_handler(
    body: NameRequest,
    driver: VolumeDriver,
) -> Result<impl Reply, Rejection> {
    match run_blocking(move || driver.path(&body.name)).await {
        Ok(mountpoint) => Ok(success_response(MountpointResponse { mountpoint })),
        Err(e) => Ok(error_response(&e.to_string())),
    }
}

pub async fn mount_volume_handler(
    body: MountRequest,
    driver: VolumeDriver,
) -> Result<impl Reply, Rejection> {
    debug!(name = %body.name, id = %body.id, "mount request");
    match run_blocking(move || driver.mount(&body.name)).await {
        Ok(mountpoint) => Ok(success_response(MountpointResponse { mountpoint })),
        Err(e) => Ok(error_response(&e.to_string())),
    }
}

/// Unmount never reaches the backend, so it runs inline
pub async fn unmount_volume_handler(
    body: MountRequest,
    driver: VolumeDriver,
) -> Result<impl Reply, Rejection> {
    debug!(name = %body.name, id = %body.id, "unmount request");
    match driver.unmount(&body.name) {
        Ok(()) => Ok(success_response(EmptyResponse::default())),
        Err(e) => Ok(error_response(&e.to_string())),
    }
}
