//! One-shot rendering

use super::SessionData;
use crate::print_cmd_success;
use std::error::Error;

/// Refresh every panel once, then write the page to the output path or stdout.
/// Events go to stderr.
pub async fn run_snapshot(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    session.dashboard.refresh_all().await;

    // Every panel has reported by now.
    session.event_receiver.close();
    while let Some(event) = session.event_receiver.recv().await {
        if event.should_display() {
            eprintln!("{}", event);
        }
    }

    let document = session.dashboard.document();
    match &session.output_path {
        Some(path) => {
            document.save_page(path, None).await?;
            print_cmd_success!("Snapshot written", "{}", path.display());
        }
        None => print!("{}", document.render_page(None)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAnalyticsApi;
    use crate::api::error::ApiError;
    use crate::config::Config;
    use crate::session::{FilterOverrides, setup::setup_session_with_api};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_snapshot_renders_failures_in_place() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("nested").join("page.html");

        let mut mock = MockAnalyticsApi::new();
        mock.expect_base_url()
            .return_const("http://analytics.test/api/v1".to_string());
        mock.expect_fetch_json().times(5).returning(|_| {
            Err(ApiError::Http {
                status: 502,
                message: "Bad Gateway".to_string(),
            })
        });

        let config = Config {
            output_path: Some(output.clone()),
            ..Config::default()
        };
        let session =
            setup_session_with_api(Arc::new(mock), &config, &FilterOverrides::default()).unwrap();
        run_snapshot(session).await.unwrap();

        let page = std::fs::read_to_string(&output).unwrap();
        assert!(page.contains("No se puede establecer conexión con la API"));
        assert_eq!(page.matches("Error al cargar los datos").count(), 4);
        assert!(!page.contains("http-equiv"));
    }
}
