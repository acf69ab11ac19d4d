//! The six smoke checks and the routine that executes them.
//!
//! Every check has the same shape: resolve its fixture, issue one HTTP
//! request, evaluate a fixed expectation over the response, and produce
//! exactly one [`Outcome`]. The checks are data, not code: [`all`] returns
//! the table and [`Check::execute`] is the single shared body.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::{config::FixtureSet, http, Result};

/// Verdict of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Status {
    /// Request completed and matched the expectation.
    Pass,
    /// Request completed but did not match.
    Fail,
    /// The request or response handling itself failed.
    Error,
}

/// One row of the report. Produced exactly once per check per run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub name: &'static str,
    pub status: Status,
    pub message: String,
    pub duration: Duration,
}

/// How a check derives its request from the fixture set.
#[derive(Debug, Clone, Copy)]
pub enum Payload {
    /// JSON body taken from the named fixture.
    Json(&'static str),
    /// Identifier appended to the path, taken from the named fixture.
    PathId(&'static str),
}

/// Fixed expectation over the HTTP response.
#[derive(Debug, Clone, Copy)]
pub enum Expect {
    /// Status code plus the presence of a top-level key in the JSON body.
    StatusAndKey(StatusCode, &'static str),
    /// Status code alone; the body is not inspected.
    Status(StatusCode),
}

enum Verdict {
    Pass,
    Fail(String),
}

impl Expect {
    /// A status mismatch is a plain FAIL. The body is only parsed once the
    /// status matches, so a non-JSON error page on the wrong status does not
    /// turn a FAIL into an ERROR.
    fn evaluate(&self, res: &http::Response) -> std::result::Result<Verdict, http::Error> {
        match *self {
            Expect::StatusAndKey(want, key) => {
                if res.status() != want {
                    return Ok(Verdict::Fail(format!("Unexpected response: {}", res.text())));
                }
                let body: Value = res.json()?;
                if body.get(key).is_some() {
                    Ok(Verdict::Pass)
                } else {
                    Ok(Verdict::Fail(format!("Unexpected response: {}", res.text())))
                }
            }
            Expect::Status(want) => {
                if res.status() == want {
                    Ok(Verdict::Pass)
                } else {
                    Ok(Verdict::Fail(format!(
                        "Expected {}, got {}",
                        want.as_u16(),
                        res.status().as_u16()
                    )))
                }
            }
        }
    }
}

/// A single smoke check: one request, one expectation, one outcome.
#[derive(Debug, Clone)]
pub struct Check {
    pub name: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub payload: Payload,
    pub expect: Expect,
    pub pass_message: &'static str,
}

impl Check {
    /// Run the check to completion. Never fails: any error on the way is
    /// folded into an ERROR outcome. The ERROR duration is reported as zero
    /// rather than the elapsed time up to the failure point.
    pub async fn execute(
        &self,
        client: &http::Client,
        base_url: &str,
        fixtures: &FixtureSet,
    ) -> Outcome {
        let start = Instant::now();
        match self.perform(client, base_url, fixtures).await {
            Ok(res) => {
                let duration = start.elapsed();
                match self.expect.evaluate(&res) {
                    Ok(Verdict::Pass) => Outcome {
                        name: self.name,
                        status: Status::Pass,
                        message: self.pass_message.to_string(),
                        duration,
                    },
                    Ok(Verdict::Fail(message)) => Outcome {
                        name: self.name,
                        status: Status::Fail,
                        message,
                        duration,
                    },
                    Err(e) => self.error_outcome(e.to_string()),
                }
            }
            Err(e) => self.error_outcome(e.to_string()),
        }
    }

    async fn perform(
        &self,
        client: &http::Client,
        base_url: &str,
        fixtures: &FixtureSet,
    ) -> Result<http::Response> {
        let res = match self.payload {
            Payload::Json(key) => {
                let body = fixtures.get(key)?;
                client
                    .request(self.method.clone(), format!("{base_url}{}", self.path))
                    .json(body)
                    .send()
                    .await?
            }
            Payload::PathId(key) => {
                let id = render_id(fixtures.get(key)?);
                client
                    .request(self.method.clone(), format!("{base_url}{}/{id}", self.path))
                    .send()
                    .await?
            }
        };
        Ok(res)
    }

    fn error_outcome(&self, message: String) -> Outcome {
        Outcome {
            name: self.name,
            status: Status::Error,
            message,
            duration: Duration::ZERO,
        }
    }
}

/// Render a fixture value as a path segment. JSON strings are used verbatim,
/// anything else keeps its JSON rendering (numbers in particular).
fn render_id(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The check table, in execution order.
pub fn all() -> Vec<Check> {
    vec![
        Check {
            name: "Login with Valid Credentials",
            method: Method::POST,
            path: "/api/login",
            payload: Payload::Json("valid_login"),
            expect: Expect::StatusAndKey(StatusCode::OK, "token"),
            pass_message: "Login successful and token received.",
        },
        Check {
            name: "Login with Missing Password",
            method: Method::POST,
            path: "/api/login",
            payload: Payload::Json("invalid_login"),
            expect: Expect::StatusAndKey(StatusCode::BAD_REQUEST, "error"),
            pass_message: "Proper error returned for missing password.",
        },
        Check {
            name: "Get User with Valid ID",
            method: Method::GET,
            path: "/api/users",
            payload: Payload::PathId("valid_user_id"),
            expect: Expect::StatusAndKey(StatusCode::OK, "data"),
            pass_message: "User data retrieved successfully.",
        },
        Check {
            name: "Get User with Invalid ID",
            method: Method::GET,
            path: "/api/users",
            payload: Payload::PathId("invalid_user_id"),
            expect: Expect::Status(StatusCode::NOT_FOUND),
            pass_message: "404 returned as expected for non-existing user.",
        },
        Check {
            name: "Create User",
            method: Method::POST,
            path: "/api/users",
            payload: Payload::Json("create_user"),
            expect: Expect::StatusAndKey(StatusCode::CREATED, "id"),
            pass_message: "User created successfully.",
        },
        Check {
            name: "Delete User",
            method: Method::DELETE,
            path: "/api/users",
            payload: Payload::PathId("delete_user_id"),
            expect: Expect::Status(StatusCode::NO_CONTENT),
            pass_message: "User deleted successfully (204).",
        },
    ]
}
