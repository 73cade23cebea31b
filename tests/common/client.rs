//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all bookstore-server endpoints.
//!
//! When API routes or request formats change, update only this file.

#![allow(dead_code)]

use super::constants::*;
use reqwest::Response;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// Decoded `{result, errorMessage}` body
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub result: Value,
    #[serde(rename = "errorMessage")]
    pub error_message: String,
}

impl Envelope {
    pub async fn from_response(response: Response) -> Self {
        response
            .json()
            .await
            .expect("Response body is not a valid envelope")
    }
}

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Books Endpoints
    // ========================================================================

    /// GET /books/health
    pub async fn health(&self) -> Response {
        self.client
            .get(format!("{}/books/health", self.base_url))
            .send()
            .await
            .expect("Health request failed")
    }

    /// POST /book with a raw JSON body
    pub async fn post_book_json(&self, body: Value) -> Response {
        self.client
            .post(format!("{}/book", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("Create book request failed")
    }

    /// POST /book
    pub async fn add_book(
        &self,
        title: &str,
        author: &str,
        year: i64,
        price: i64,
        genres: &[&str],
    ) -> Response {
        self.post_book_json(json!({
            "title": title,
            "author": author,
            "year": year,
            "price": price,
            "genres": genres,
        }))
        .await
    }

    /// GET /books/total?<query>
    pub async fn count_books(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(format!("{}/books/total", self.base_url))
            .query(query)
            .send()
            .await
            .expect("Count books request failed")
    }

    /// GET /books?<query>
    pub async fn list_books(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(format!("{}/books", self.base_url))
            .query(query)
            .send()
            .await
            .expect("List books request failed")
    }

    /// GET /book?id=<id>
    pub async fn get_book(&self, id: &str) -> Response {
        self.client
            .get(format!("{}/book", self.base_url))
            .query(&[("id", id)])
            .send()
            .await
            .expect("Get book request failed")
    }

    /// PUT /book?id=<id>&price=<price>
    pub async fn update_price(&self, id: &str, price: &str) -> Response {
        self.client
            .put(format!("{}/book", self.base_url))
            .query(&[("id", id), ("price", price)])
            .send()
            .await
            .expect("Update price request failed")
    }

    /// DELETE /book?id=<id>
    pub async fn delete_book(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/book", self.base_url))
            .query(&[("id", id)])
            .send()
            .await
            .expect("Delete book request failed")
    }

    // ========================================================================
    // Admin Endpoints
    // ========================================================================

    /// GET /logs/level?logger-name=<name>
    pub async fn get_logger_level(&self, name: &str) -> Response {
        self.client
            .get(format!("{}/logs/level", self.base_url))
            .query(&[("logger-name", name)])
            .send()
            .await
            .expect("Get logger level request failed")
    }

    /// PUT /logs/level?logger-name=<name>&logger-level=<level>
    pub async fn set_logger_level(&self, name: &str, level: &str) -> Response {
        self.client
            .put(format!("{}/logs/level", self.base_url))
            .query(&[("logger-name", name), ("logger-level", level)])
            .send()
            .await
            .expect("Set logger level request failed")
    }

    /// GET /
    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }
}
