//! Integration tests for list and detail views
//!
//! These tests verify:
//! - Search filters by case-insensitive substring and keeps the term in page links
//! - Pagination context and out-of-range pages
//! - Detail views and 404s

use axum::http::StatusCode;
use serde_json::Value;

mod helpers;
use helpers::*;

fn names(list: &Value, field: &str) -> Vec<String> {
    list.as_array()
        .expect("list is an array")
        .iter()
        .map(|item| item[field].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_driver_search_is_case_insensitive() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_as_new_driver("admin").await;
    DriverFixture::new("john_driver", "AB123456").insert(&app.pool).await;
    DriverFixture::new("jane_smith", "CD123456").insert(&app.pool).await;

    let response = app.get("/drivers/?username=JOHN", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(names(&json["data"]["driver_list"], "username"), vec!["john_driver"]);
    assert_eq!(json["data"]["search_form"]["username"], "JOHN");
}

#[tokio::test]
async fn test_empty_search_returns_everything() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_as_new_driver("admin").await;
    let tesla = insert_manufacturer(&app.pool, "Tesla", "USA").await;
    insert_car(&app.pool, "Model 3", tesla).await;
    insert_car(&app.pool, "Model S", tesla).await;

    let json = body_json(app.get("/cars/?model=", Some(&cookie)).await).await;
    assert_eq!(names(&json["data"]["car_list"], "model"), vec!["Model 3", "Model S"]);
    assert_eq!(json["data"]["is_paginated"], false);
}

#[tokio::test]
async fn test_search_without_matches_is_empty() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_as_new_driver("admin").await;
    insert_manufacturer(&app.pool, "Tesla", "USA").await;

    let response = app.get("/manufacturers/?name=Lada", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["manufacturer_list"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_paginates_and_keeps_term() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_as_new_driver("admin").await;
    for i in 0..15 {
        DriverFixture::new(format!("driver{:02}", i), format!("AB{:06}", i))
            .insert(&app.pool)
            .await;
    }

    let json = body_json(app.get("/drivers/?username=driver", Some(&cookie)).await).await;
    let data = &json["data"];
    assert_eq!(data["is_paginated"], true);
    assert_eq!(data["page_obj"]["count"], 15);
    assert_eq!(data["page_obj"]["num_pages"], 3);
    assert_eq!(data["driver_list"].as_array().unwrap().len(), 5);
    assert_eq!(data["next_page_url"], "/drivers/?username=driver&page=2");
    assert_eq!(data["previous_page_url"], Value::Null);

    let json = body_json(app.get("/drivers/?username=driver&page=2", Some(&cookie)).await).await;
    assert_eq!(json["data"]["page_obj"]["number"], 2);
    assert_eq!(json["data"]["previous_page_url"], "/drivers/?username=driver&page=1");
}

#[tokio::test]
async fn test_invalid_pages_are_not_found() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_as_new_driver("admin").await;

    for query in ["page=2", "page=0", "page=abc"] {
        let response = app.get(&format!("/drivers/?{}", query), Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} should be 404", query);
    }

    let last = app.get("/drivers/?page=last", Some(&cookie)).await;
    assert_eq!(last.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_page_size_comes_from_config() {
    let app = TestApp::with_page_size(2).await;
    let (_, cookie) = app.login_as_new_driver("admin").await;
    for name in ["Audi", "BMW", "Citroen"] {
        insert_manufacturer(&app.pool, name, "Europe").await;
    }

    let json = body_json(app.get("/manufacturers/", Some(&cookie)).await).await;
    assert_eq!(names(&json["data"]["manufacturer_list"], "name"), vec!["Audi", "BMW"]);
    assert_eq!(json["data"]["page_obj"]["num_pages"], 2);
}

#[tokio::test]
async fn test_driver_detail_lists_cars() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_as_new_driver("admin").await;
    let driver_id = DriverFixture::new("john_driver", "AB123456")
        .with_name("John", "Doe")
        .insert(&app.pool)
        .await;
    let tesla = insert_manufacturer(&app.pool, "Tesla", "USA").await;
    let car_id = insert_car(&app.pool, "Model 3", tesla).await;
    assign(&app.pool, car_id, driver_id).await;

    let response = app.get(&format!("/drivers/{}/", driver_id), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let driver = &json["data"]["driver"];

    assert_eq!(driver["username"], "john_driver");
    assert_eq!(driver["license_number"], "AB123456");
    assert!(driver.get("password").is_none());
    assert_eq!(driver["cars"][0]["model"], "Model 3");
    assert_eq!(driver["cars"][0]["manufacturer"]["name"], "Tesla");
}

#[tokio::test]
async fn test_car_detail_shows_assignment() {
    let app = TestApp::new().await;
    let (driver_id, cookie) = app.login_as_new_driver("admin").await;
    let tesla = insert_manufacturer(&app.pool, "Tesla", "USA").await;
    let car_id = insert_car(&app.pool, "Model 3", tesla).await;

    let json = body_json(app.get(&format!("/cars/{}/", car_id), Some(&cookie)).await).await;
    assert_eq!(json["data"]["car"]["manufacturer"]["country"], "USA");
    assert_eq!(json["data"]["is_assigned"], false);

    assign(&app.pool, car_id, driver_id).await;
    let json = body_json(app.get(&format!("/cars/{}/", car_id), Some(&cookie)).await).await;
    assert_eq!(json["data"]["is_assigned"], true);
    assert_eq!(json["data"]["car"]["drivers"][0]["username"], "admin");
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = TestApp::new().await;
    let (_, cookie) = app.login_as_new_driver("admin").await;

    for path in ["/drivers/999/", "/cars/999/", "/manufacturers/999/update/"] {
        let response = app.get(path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{} should be 404", path);
    }
}
