//-----------------------------------------------------
// PLUGIN PROTOCOL ROUTES
//-----------------------------------------------------

use crate::handlers::*;
use crate::models::{CreateRequest, MountRequest, NameRequest};
use crate::utils::status_response;
use crate::volume::VolumeDriver;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

// Inject the driver into route handlers
fn with_driver(
    driver: VolumeDriver,
) -> impl Filter<Extract = (VolumeDriver,), Error = Infallible> + Clone {
    warp::any().map(move || driver.clone())
}

// POST /<endpoint>
fn endpoint(name: &'static str) -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::post().and(warp::path(name)).and(warp::path::end())
}

// Docker sends application/vnd.docker.plugins.v1.2+json, which body::json accepts
fn json_body<T: DeserializeOwned + Send>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
{
    warp::body::json()
}

/// Every endpoint of the volume plugin protocol
pub fn plugin_routes(
    driver: VolumeDriver,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    // POST /Plugin.Activate - Handshake
    let activate = endpoint("Plugin.Activate").and_then(activate_handler);

    // POST /VolumeDriver.Capabilities - Static scope
    let capabilities = endpoint("VolumeDriver.Capabilities")
        .and(with_driver(driver.clone()))
        .and_then(capabilities_handler);

    // POST /VolumeDriver.Create - Create dataset for volume
    let create = endpoint("VolumeDriver.Create")
        .and(json_body::<CreateRequest>())
        .and(with_driver(driver.clone()))
        .and_then(create_volume_handler);

    // POST /VolumeDriver.Get - Inspect one volume
    let get = endpoint("VolumeDriver.Get")
        .and(json_body::<NameRequest>())
        .and(with_driver(driver.clone()))
        .and_then(get_volume_handler);

    // POST /VolumeDriver.List - All volumes under all roots
    let list = endpoint("VolumeDriver.List")
        .and(with_driver(driver.clone()))
        .and_then(list_volumes_handler);

    // POST /VolumeDriver.Remove - Destroy dataset
    let remove = endpoint("VolumeDriver.Remove")
        .and(json_body::<NameRequest>())
        .and(with_driver(driver.clone()))
        .and_then(remove_volume_handler);

    // POST /VolumeDriver.Path - Mountpoint lookup
    let path = endpoint("VolumeDriver.Path")
        .and(json_body::<NameRequest>())
        .and(with_driver(driver.clone()))
        .and_then(volume_path_handler);

    // POST /VolumeDriver.Mount - Mountpoint lookup, nothing is mounted
    let mount = endpoint("VolumeDriver.Mount")
        .and(json_body::<MountRequest>())
        .and(with_driver(driver.clone()))
        .and_then(mount_volume_handler);

    // POST /VolumeDriver.Unmount - No-op
    let unmount = endpoint("VolumeDriver.Unmount")
        .and(json_body::<MountRequest>())
        .and(with_driver(driver))
        .and_then(unmount_volume_handler);

    activate
        .or(capabilities)
        .or(create)
        .or(get)
        .or(list)
        .or(remove)
        .or(path)
        .or(mount)
        .or(unmount)
        .recover(handle_rejection)
}

// Protocol errors still answer with an {"Err": ...} body
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let reply = if err.is_not_found() {
        status_response("unknown endpoint", StatusCode::NOT_FOUND)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        status_response(&format!("invalid request body: {}", e), StatusCode::BAD_REQUEST)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        status_response("method not allowed", StatusCode::METHOD_NOT_ALLOWED)
    } else {
        status_response(&format!("unhandled request: {:?}", err), StatusCode::BAD_REQUEST)
    };
    Ok(reply)
}
