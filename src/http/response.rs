//! HTTP response building module
//!
//! Provides builders for the token response and the various status code
//! responses, decoupled from the command-execution logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::config::HttpConfig;
use crate::logger;

/// Build 200 OK response carrying the join command output
///
/// The body is the captured standard output, byte-for-byte. HEAD requests
/// get the same headers with an empty body.
pub fn build_token_response(
    output: Vec<u8>,
    http_config: &HttpConfig,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Content-Length", output.len())
        .header("Server", &http_config.server_name);

    if http_config.enable_cors {
        builder = builder.header("Access-Control-Allow-Origin", "*");
    }

    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(output)
    };

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("404 Not Found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 413 Payload Too Large response
pub fn build_413_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(413)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("413 Payload Too Large")))
        .unwrap_or_else(|e| {
            log_build_error("413", &e);
            Response::new(Full::new(Bytes::from("413 Payload Too Large")))
        })
}

/// Build 500 Internal Server Error response
///
/// Returned when the join command cannot be spawned or exits non-zero.
/// Command output is never relayed on failure.
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Join command failed")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Join command failed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS");

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "GET, HEAD, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("204", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

fn log_build_error(status: &str, err: &hyper::http::Error) {
    logger::log_error(&format!("Failed to build {status} response: {err}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_http_config() -> HttpConfig {
        HttpConfig {
            server_name: "JoinServe/0.1".to_string(),
            enable_cors: false,
            max_body_size: 1_048_576,
        }
    }

    #[test]
    fn test_token_response() {
        let resp = build_token_response(b"join cmd output\n".to_vec(), &test_http_config(), false);
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "text/plain"
        );
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "16");
        assert_eq!(resp.headers().get("Server").unwrap(), "JoinServe/0.1");
        assert!(resp.headers().get("Access-Control-Allow-Origin").is_none());
    }

    #[test]
    fn test_token_response_head() {
        // HEAD keeps the Content-Length of the would-be body
        let resp = build_token_response(b"abc".to_vec(), &test_http_config(), true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "3");
    }

    #[test]
    fn test_token_response_cors() {
        let mut cfg = test_http_config();
        cfg.enable_cors = true;
        let resp = build_token_response(Vec::new(), &cfg, false);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }

    #[test]
    fn test_404_response() {
        let resp = build_404_response();
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/plain");
    }

    #[test]
    fn test_405_response() {
        let resp = build_405_response();
        assert_eq!(resp.status(), 405);
        assert_eq!(
            resp.headers().get("Allow").unwrap(),
            "GET, HEAD, OPTIONS"
        );
    }

    #[test]
    fn test_500_response() {
        let resp = build_500_response();
        assert_eq!(resp.status(), 500);
    }

    #[test]
    fn test_options_response() {
        let resp = build_options_response(false);
        assert_eq!(resp.status(), 204);
        assert!(resp.headers().get("Access-Control-Allow-Methods").is_none());

        let resp = build_options_response(true);
        assert_eq!(
            resp.headers()
                .get("Access-Control-Allow-Methods")
                .unwrap(),
            "GET, HEAD, OPTIONS"
        );
    }
}
