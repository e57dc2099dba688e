//! # Integration Tests: Plugin Protocol
//!
//! Exercises the HTTP surface in-process with `warp::test`.

mod common;

use common::driver_with_roots;
use serde_json::{json, Value};
use warp::test::request;
use warp::{Filter, Reply};
use zfs_volume_driver::routes::plugin_routes;

const PLUGIN_CONTENT_TYPE: &str = "application/vnd.docker.plugins.v1.2+json";

async fn post<F>(routes: &F, path: &str, body: Value) -> (u16, Value)
where
    F: Filter + 'static,
    F::Extract: Reply + Send,
{
    let resp = request()
        .method("POST")
        .path(path)
        .header("content-type", PLUGIN_CONTENT_TYPE)
        .body(body.to_string())
        .reply(routes)
        .await;
    let status = resp.status().as_u16();
    let value = serde_json::from_slice(resp.body()).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_activate_declares_volume_driver() {
    let (_backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);

    let (status, body) = post(&routes, "/Plugin.Activate", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"Implements": ["VolumeDriver"]}));
}

#[tokio::test]
async fn test_capabilities_are_local() {
    let (_backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);

    let (status, body) = post(&routes, "/VolumeDriver.Capabilities", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"Capabilities": {"Scope": "local"}}));
}

#[tokio::test]
async fn test_create_get_list_remove_flow() {
    let (_backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);

    let (status, body) = post(
        &routes,
        "/VolumeDriver.Create",
        json!({"Name": "proj_vol", "Opts": {"compression": "lz4"}}),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.get("Err").is_none());

    let (status, body) = post(
        &routes,
        "/VolumeDriver.Get",
        json!({"Name": "tank/docker/proj/vol"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["Volume"]["Name"], "tank/docker/proj/vol");
    assert_eq!(body["Volume"]["Mountpoint"], "/tank/docker/proj/vol");
    assert_eq!(body["Volume"]["CreatedAt"], "2024-03-01T12:30:00Z");

    let (status, body) = post(&routes, "/VolumeDriver.List", json!({})).await;
    assert_eq!(status, 200);
    let names: Vec<&str> = body["Volumes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["Name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"tank/docker/proj/vol"));

    let (status, _) = post(
        &routes,
        "/VolumeDriver.Remove",
        json!({"Name": "tank/docker/proj/vol"}),
    )
    .await;
    assert_eq!(status, 200);

    let (status, body) = post(
        &routes,
        "/VolumeDriver.Get",
        json!({"Name": "tank/docker/proj/vol"}),
    )
    .await;
    assert_eq!(status, 500);
    assert!(body["Err"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_create_with_null_opts() {
    let (backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);

    let (status, _) = post(
        &routes,
        "/VolumeDriver.Create",
        json!({"Name": "tank/docker/web", "Opts": null}),
    )
    .await;
    assert_eq!(status, 200);
    assert!(backend.contains("tank/docker/web"));
}

#[tokio::test]
async fn test_duplicate_create_reports_err() {
    let (_backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);

    post(&routes, "/VolumeDriver.Create", json!({"Name": "proj_vol"})).await;
    let (status, body) = post(&routes, "/VolumeDriver.Create", json!({"Name": "proj_vol"})).await;
    assert_eq!(status, 500);
    assert_eq!(
        body["Err"],
        "volume already exists: tank/docker/proj/vol"
    );
}

#[tokio::test]
async fn test_mount_path_unmount() {
    let (backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);
    post(&routes, "/VolumeDriver.Create", json!({"Name": "tank/docker/web"})).await;

    let (status, body) = post(
        &routes,
        "/VolumeDriver.Mount",
        json!({"Name": "tank/docker/web", "ID": "abc123"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"Mountpoint": "/tank/docker/web"}));

    let (status, body) = post(&routes, "/VolumeDriver.Path", json!({"Name": "tank/docker/web"})).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({"Mountpoint": "/tank/docker/web"}));

    backend.reset_calls();
    let (status, body) = post(
        &routes,
        "/VolumeDriver.Unmount",
        json!({"Name": "tank/docker/web", "ID": "abc123"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({}));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (_backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);

    let (status, body) = post(&routes, "/VolumeDriver.Get", json!({"Volume": 1})).await;
    assert_eq!(status, 400);
    assert!(body["Err"].as_str().unwrap().contains("invalid request body"));
}

#[tokio::test]
async fn test_unknown_endpoint() {
    let (_backend, driver) = driver_with_roots(&["tank/docker"]);
    let routes = plugin_routes(driver);

    let (status, body) = post(&routes, "/VolumeDriver.Snapshot", json!({})).await;
    assert_eq!(status, 404);
    assert!(body.get("Err").is_some());
}
