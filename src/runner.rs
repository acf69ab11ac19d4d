//! Sequential check runner.

use console::Term;
use tracing::*;

use crate::{
    check::{self, Check, Status},
    config::{FixtureSet, HarnessConfig},
    http,
    report::{ErrorLog, Report},
};

/// Runs the check table top to bottom, one request in flight at a time.
///
/// Fixture loading and report initialization are fatal; a check failing or
/// erroring is not. Every run produces exactly one report row per check.
pub struct Runner {
    cfg: HarnessConfig,
    checks: Vec<Check>,
}

impl Runner {
    pub fn new(cfg: HarnessConfig) -> Runner {
        Runner {
            cfg,
            checks: check::all(),
        }
    }

    pub async fn run(&self) -> eyre::Result<()> {
        let fixtures = FixtureSet::load(&self.cfg.fixtures)?;
        let mut report = Report::create(&self.cfg.report)?;
        let mut errors = ErrorLog::open(&self.cfg.error_log)?;
        let client = http::Client::new(self.cfg.timeout)?;

        let term = Term::stdout();
        term.write_line("Starting API smoke tests...")?;

        for check in &self.checks {
            debug!("running check \"{}\"", check.name);
            let outcome = check.execute(&client, &self.cfg.base_url, &fixtures).await;
            report.record(&outcome)?;
            if outcome.status == Status::Error {
                errors.append(&format!(
                    "{} - Exception: {}",
                    outcome.name, outcome.message
                ))?;
            }
        }

        term.write_line(&format!(
            "All checks completed. See '{}' and '{}'.",
            self.cfg.report.display(),
            self.cfg.error_log.display()
        ))?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::Path;

    fn write_fixtures(path: &Path, with_delete_id: bool) -> eyre::Result<()> {
        let mut fixtures = json!({
            "valid_login": {"email": "eve.holt@reqres.in", "password": "cityslicka"},
            "invalid_login": {"email": "peter@klaven"},
            "valid_user_id": 2,
            "invalid_user_id": 23,
            "create_user": {"name": "morpheus", "job": "leader"},
        });
        if with_delete_id {
            fixtures["delete_user_id"] = json!(2);
        }
        std::fs::write(path, serde_json::to_string_pretty(&fixtures)?)?;
        Ok(())
    }

    async fn mock_all_endpoints(server: &mut mockito::Server) -> Vec<mockito::Mock> {
        let mut mocks = Vec::new();
        mocks.push(server
            .mock("POST", "/api/login")
            .match_body(Matcher::Json(
                json!({"email": "eve.holt@reqres.in", "password": "cityslicka"}),
            ))
            .with_status(200)
            .with_body(r#"{"token": "QpwL5tke4Pnpja7X4"}"#)
            .create_async()
            .await);
        mocks.push(server
            .mock("POST", "/api/login")
            .match_body(Matcher::Json(json!({"email": "peter@klaven"})))
            .with_status(400)
            .with_body(r#"{"error": "Missing password"}"#)
            .create_async()
            .await);
        mocks.push(server
            .mock("GET", "/api/users/2")
            .with_status(200)
            .with_body(r#"{"data": {"id": 2, "first_name": "Janet"}}"#)
            .create_async()
            .await);
        mocks.push(server
            .mock("GET", "/api/users/23")
            .with_status(404)
            .with_body("{}")
            .create_async()
            .await);
        mocks.push(server
            .mock("POST", "/api/users")
            .match_body(Matcher::Json(json!({"name": "morpheus", "job": "leader"})))
            .with_status(201)
            .with_body(r#"{"id": "512", "createdAt": "2026-08-30T00:00:00.000Z"}"#)
            .create_async()
            .await);
        mocks.push(server
            .mock("DELETE", "/api/users/2")
            .with_status(204)
            .create_async()
            .await);
        mocks
    }

    fn config(dir: &Path, base_url: String) -> HarnessConfig {
        HarnessConfig {
            base_url,
            fixtures: dir.join("test_data.json"),
            report: dir.join("test_results.csv"),
            error_log: dir.join("log.txt"),
            ..HarnessConfig::default()
        }
    }

    fn read_rows(path: &Path) -> eyre::Result<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)?;
        Ok(reader
            .records()
            .map(|r| r.map(|rec| rec.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<_, _>>()?)
    }

    #[tokio::test]
    async fn full_run_records_header_plus_six_pass_rows() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        write_fixtures(&dir.path().join("test_data.json"), true)?;
        let mut server = mockito::Server::new_async().await;
        let _mocks = mock_all_endpoints(&mut server).await;

        let cfg = config(dir.path(), server.url());
        Runner::new(cfg.clone()).run().await?;

        let rows = read_rows(&cfg.report)?;
        assert_eq!(rows.len(), 7);
        for row in &rows[1..] {
            assert_eq!(row[2], "PASS", "unexpected row: {row:?}");
        }
        assert!(!cfg.error_log.exists() || std::fs::read_to_string(&cfg.error_log)?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn rerun_truncates_report_but_error_log_accumulates() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        // delete_user_id is missing, so the delete check errors every run
        write_fixtures(&dir.path().join("test_data.json"), false)?;
        let mut server = mockito::Server::new_async().await;
        let _mocks = mock_all_endpoints(&mut server).await;

        let cfg = config(dir.path(), server.url());
        Runner::new(cfg.clone()).run().await?;
        Runner::new(cfg.clone()).run().await?;

        let rows = read_rows(&cfg.report)?;
        assert_eq!(rows.len(), 7, "second run starts from a fresh report");

        let delete_row = &rows[6];
        assert_eq!(delete_row[1], "Delete User");
        assert_eq!(delete_row[2], "ERROR");
        assert_eq!(delete_row[4], "0.00s");

        let log = std::fs::read_to_string(&cfg.error_log)?;
        let lines: Vec<_> = log.lines().collect();
        assert_eq!(lines.len(), 2, "one error line per run, never truncated");
        for line in lines {
            assert!(line.contains("Delete User - Exception:"), "line: {line}");
            assert!(line.contains("delete_user_id"), "line: {line}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_host_yields_six_error_rows_not_a_failed_run() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        write_fixtures(&dir.path().join("test_data.json"), true)?;

        // nothing listens on port 9 (discard)
        let cfg = config(dir.path(), "http://127.0.0.1:9".into());
        Runner::new(cfg.clone()).run().await?;

        let rows = read_rows(&cfg.report)?;
        assert_eq!(rows.len(), 7);
        for row in &rows[1..] {
            assert_eq!(row[2], "ERROR", "unexpected row: {row:?}");
            assert_eq!(row[4], "0.00s");
        }

        let log = std::fs::read_to_string(&cfg.error_log)?;
        assert_eq!(log.lines().count(), 6);
        Ok(())
    }

    #[tokio::test]
    async fn missing_fixture_file_is_fatal() -> eyre::Result<()> {
        let dir = tempfile::tempdir()?;
        let cfg = config(dir.path(), "http://127.0.0.1:9".into());

        let result = Runner::new(cfg.clone()).run().await;
        assert!(result.is_err());
        assert!(!cfg.report.exists(), "no report before fixtures load");
        Ok(())
    }
}
