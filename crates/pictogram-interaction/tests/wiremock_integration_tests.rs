//! Integration tests for the HTTP adapters using wiremock.
//!
//! Every remote service is mocked; nothing here reaches the network.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use pictogram_core::raster::DataUri;

fn sample_png() -> Vec<u8> {
    let mut image = GrayImage::from_pixel(8, 8, Luma([255]));
    image.put_pixel(3, 3, Luma([0]));
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    png
}

fn sample_data_uri() -> DataUri {
    DataUri::new("image/png", sample_png())
}

mod iconify_tests {
    use pictogram_core::PictogramError;
    use pictogram_core::config::IconifyConfig;
    use pictogram_core::icon::IconFetcher;
    use pictogram_interaction::IconifyClient;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MAIL_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M4 4h16v16H4z"/></svg>"#;

    fn client(server: &MockServer) -> IconifyClient {
        IconifyClient::new(&IconifyConfig::default())
            .unwrap()
            .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_fetches_raw_svg() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/material-symbols/mail-outline.svg"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MAIL_SVG))
            .mount(&mock_server)
            .await;

        let svg = client(&mock_server)
            .get_icon_svg("material-symbols", "mail-outline")
            .await
            .unwrap();
        assert_eq!(svg, MAIL_SVG);
    }

    #[tokio::test]
    async fn test_not_found_is_http_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("404"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .get_icon_svg("lucide", "does-not-exist")
            .await
            .unwrap_err();
        assert!(matches!(err, PictogramError::Http { status: Some(404), .. }));
    }

    #[tokio::test]
    async fn test_non_svg_body_is_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server)
            .get_icon_svg("lucide", "mail")
            .await
            .unwrap_err();
        assert!(matches!(err, PictogramError::GenerationFailure(_)));
    }
}

mod openai_tests {
    use pictogram_core::PictogramError;
    use pictogram_core::generation::StyleGuide;
    use pictogram_core::raster::{ImageGenerator, RasterImage};
    use pictogram_interaction::OpenAiImageGenerator;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator(server: &MockServer) -> OpenAiImageGenerator {
        OpenAiImageGenerator::new(Some("test-key".to_string()), "gpt-image-1")
            .unwrap()
            .with_endpoint(format!("{}/v1/images/generations", server.uri()))
    }

    #[tokio::test]
    async fn test_generate_returns_url() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/images/generations"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-image-1",
                "background": "transparent",
                "size": "1024x1024"
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"data": [{"url": "https://cdn.example/icon.png"}]})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let image = generator(&mock_server)
            .generate("mail", &StyleGuide::resolve(None))
            .await
            .unwrap();
        assert_eq!(image, RasterImage::Url("https://cdn.example/icon.png".to_string()));
    }

    #[tokio::test]
    async fn test_generate_accepts_inline_base64() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": [{"b64_json": "AQID"}]})),
            )
            .mount(&mock_server)
            .await;

        let image = generator(&mock_server)
            .generate("star", &StyleGuide::resolve(Some("material")))
            .await
            .unwrap();
        assert!(matches!(image, RasterImage::InlineBytes { ref bytes, .. } if bytes == &[1, 2, 3]));
    }

    #[tokio::test]
    async fn test_api_error_message_is_surfaced() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "Your request was rejected", "type": "invalid_request_error"}
            })))
            .mount(&mock_server)
            .await;

        let err = generator(&mock_server)
            .generate("mail", &StyleGuide::resolve(None))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "HTTP error (400): OpenAI: Your request was rejected"
        );
    }

    #[tokio::test]
    async fn test_missing_key_never_calls_api() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let err = OpenAiImageGenerator::new(None, "gpt-image-1")
            .unwrap()
            .with_endpoint(mock_server.uri())
            .generate("mail", &StyleGuide::resolve(None))
            .await
            .unwrap_err();
        assert!(matches!(err, PictogramError::UpstreamUnavailable(_)));
        assert_eq!(err.to_string(), "OpenAI API key not configured");
    }
}

mod vertex_tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use pictogram_core::config::VertexSecret;
    use pictogram_core::generation::StyleGuide;
    use pictogram_core::raster::{ImageGenerator, RasterImage};
    use pictogram_interaction::VertexImageGenerator;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_predict_decodes_image_bytes() {
        let mock_server = MockServer::start().await;
        let png = super::sample_png();
        Mock::given(method("POST"))
            .and(path(
                "/v1/projects/demo/locations/us-central1/publishers/google/models/imagen-3.0-generate-001:predict",
            ))
            .and(header("authorization", "Bearer vertex-token"))
            .and(body_partial_json(json!({"parameters": {"sampleCount": 1}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "predictions": [{
                    "bytesBase64Encoded": STANDARD.encode(&png),
                    "mimeType": "image/png"
                }]
            })))
            .mount(&mock_server)
            .await;

        let credentials = VertexSecret {
            project_id: "demo".to_string(),
            location: None,
            access_token: "vertex-token".to_string(),
        };
        let image = VertexImageGenerator::new(Some(credentials), "imagen-3.0-generate-001")
            .unwrap()
            .with_base_url(mock_server.uri())
            .generate("メール", &StyleGuide::resolve(None))
            .await
            .unwrap();

        assert_eq!(
            image,
            RasterImage::InlineBytes {
                mime_type: Some("image/png".to_string()),
                bytes: png,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_predictions_fail() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": []})))
            .mount(&mock_server)
            .await;

        let credentials = VertexSecret {
            project_id: "demo".to_string(),
            location: Some("europe-west4".to_string()),
            access_token: "t".to_string(),
        };
        let result = VertexImageGenerator::new(Some(credentials), "imagen-3.0-generate-001")
            .unwrap()
            .with_base_url(mock_server.uri())
            .generate("mail", &StyleGuide::resolve(None))
            .await;
        assert!(result.is_err(), "empty predictions should fail");
    }
}

mod loader_tests {
    use std::time::Duration;

    use pictogram_core::raster::{RasterImage, RasterLoader};
    use pictogram_interaction::HttpRasterLoader;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_downloads_url_into_data_uri() {
        let mock_server = MockServer::start().await;
        let png = super::sample_png();
        Mock::given(method("GET"))
            .and(path("/icon.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(png.clone()),
            )
            .mount(&mock_server)
            .await;

        let loader = HttpRasterLoader::new(Duration::from_secs(5)).unwrap();
        let uri = loader
            .load(RasterImage::Url(format!("{}/icon.png", mock_server.uri())))
            .await
            .unwrap();
        assert_eq!(uri.mime_type, "image/png");
        assert_eq!(uri.bytes, png);
    }

    #[tokio::test]
    async fn test_sniffs_generic_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/octet-stream")
                    .set_body_bytes(super::sample_png()),
            )
            .mount(&mock_server)
            .await;

        let loader = HttpRasterLoader::new(Duration::from_secs(5)).unwrap();
        let uri = loader
            .load(RasterImage::Url(format!("{}/blob", mock_server.uri())))
            .await
            .unwrap();
        assert_eq!(uri.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_download_failure_is_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let loader = HttpRasterLoader::new(Duration::from_secs(5)).unwrap();
        let result = loader
            .load(RasterImage::Url(format!("{}/expired.png", mock_server.uri())))
            .await;
        assert!(result.is_err());
    }
}

mod tracer_tests {
    use std::time::Duration;

    use pictogram_core::PictogramError;
    use pictogram_core::raster::{RasterTracer, TraceOptions};
    use pictogram_interaction::HttpTraceClient;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TRACED: &str = r##"<svg width="512" height="512"><path fill="#000000" d="M0 0h10v10z"/></svg>"##;

    fn client(server: &MockServer, paths: &[&str]) -> HttpTraceClient {
        let endpoints = paths
            .iter()
            .map(|p| format!("{}{}", server.uri(), p))
            .collect();
        HttpTraceClient::with_endpoints(endpoints, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_trace_finalizes_svg() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/trace"))
            .and(body_partial_json(json!({"options": {"threshold": 128}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"svg": TRACED})))
            .mount(&mock_server)
            .await;

        let svg = client(&mock_server, &["/trace"])
            .trace(&super::sample_data_uri(), &TraceOptions::default())
            .await
            .unwrap();
        assert_eq!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 512 512" fill="currentColor"><path fill="currentColor" d="M0 0h10v10z"/></svg>"#
        );
    }

    #[tokio::test]
    async fn test_falls_back_to_next_endpoint() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/down"))
            .respond_with(ResponseTemplate::new(502))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"svg": TRACED})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let svg = client(&mock_server, &["/down", "/html", "/ok"])
            .trace(&super::sample_data_uri(), &TraceOptions::default())
            .await
            .unwrap();
        assert!(svg.contains(r#"fill="currentColor""#));
    }

    #[tokio::test]
    async fn test_all_endpoints_failing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&mock_server)
            .await;

        let err = client(&mock_server, &["/a", "/b"])
            .trace(&super::sample_data_uri(), &TraceOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PictogramError::TraceFailure(_)));
        assert!(err.to_string().contains("All SVG conversion endpoints failed"));
    }
}
