//! Tests for the HTTP request parser.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::parser::{
        parse_query_string, parse_request_head, validate_request_line, Error, HttpRequest, Method,
    };

    #[test]
    fn test_validate_simple_get() {
        let line = validate_request_line("GET / HTTP/1.1").unwrap();
        assert_eq!(line.method, Method::GET);
        assert_eq!(line.resource, "/");
    }

    #[test]
    fn test_validate_post() {
        let line = validate_request_line("POST /upload HTTP/1.1").unwrap();
        assert_eq!(line.method, Method::POST);
        assert_eq!(line.resource, "/upload");
    }

    #[test]
    fn test_validate_keeps_query_suffix() {
        let line = validate_request_line("GET /calculate-area?height=3&width=4 HTTP/1.1").unwrap();
        assert_eq!(line.resource, "/calculate-area?height=3&width=4");
    }

    #[test]
    fn test_validate_rejects_other_methods() {
        for method in ["DELETE", "PUT", "HEAD", "get", "Post"] {
            let line = format!("{method} / HTTP/1.1");
            let result = validate_request_line(&line);
            assert!(
                matches!(result, Err(Error::InvalidMethod(ref m)) if m == method),
                "{method} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_other_versions() {
        for version in ["HTTP/1.0", "HTTP/2", "http/1.1", ""] {
            let line = format!("GET / {version}");
            assert!(matches!(validate_request_line(&line), Err(Error::InvalidVersion(_))));
        }
    }

    #[test]
    fn test_validate_version_is_a_prefix_match() {
        let line = validate_request_line("GET /index.html HTTP/1.1-extra").unwrap();
        assert_eq!(line.resource, "/index.html");
    }

    #[test]
    fn test_validate_too_few_fields() {
        assert!(matches!(validate_request_line("GET /"), Err(Error::MalformedRequestLine(_))));
        assert!(matches!(validate_request_line("GET"), Err(Error::MalformedRequestLine(_))));
        assert!(matches!(validate_request_line(""), Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_validate_splits_on_single_spaces() {
        // The doubled space makes field 2 the path, which is not a version
        let result = validate_request_line("GET  /index.html HTTP/1.1");
        assert!(matches!(result, Err(Error::InvalidVersion(ref v)) if v == "/index.html"));
    }

    #[test]
    fn test_validate_extra_fields_are_ignored() {
        let line = validate_request_line("GET /a HTTP/1.1 trailing junk").unwrap();
        assert_eq!(line.resource, "/a");
    }

    #[test]
    fn test_parse_query_string_empty() {
        assert!(parse_query_string("").is_empty());
    }

    #[test]
    fn test_parse_query_string_single() {
        let params = parse_query_string("num=5");
        let expected = HashMap::from([("num".to_string(), "5".to_string())]);
        assert_eq!(params, expected);
    }

    #[test]
    fn test_parse_query_string_multiple() {
        let params = parse_query_string("height=3&width=4");
        let expected = HashMap::from([
            ("height".to_string(), "3".to_string()),
            ("width".to_string(), "4".to_string()),
        ]);
        assert_eq!(params, expected);
    }

    #[test]
    fn test_parse_query_string_splits_on_first_equals() {
        let params = parse_query_string("a=1=2");
        assert_eq!(params.get("a").unwrap(), "1=2");
    }

    #[test]
    fn test_parse_query_string_last_value_wins() {
        let params = parse_query_string("num=1&num=2");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("num").unwrap(), "2");
    }

    #[test]
    fn test_parse_query_string_ignores_tokens_without_equals() {
        let params = parse_query_string("flag&num=5&&");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("num").unwrap(), "5");
    }

    #[test]
    fn test_parse_query_string_no_percent_decoding() {
        let params = parse_query_string("file-name=my%20file.txt&empty=");
        assert_eq!(params.get("file-name").unwrap(), "my%20file.txt");
        assert_eq!(params.get("empty").unwrap(), "");
    }

    #[test]
    fn test_parse_request_head() {
        let head = b"POST /upload?file-name=a.txt HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\n";
        let request = parse_request_head(head).unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.resource, "/upload?file-name=a.txt");
        assert_eq!(request.headers, vec!["Host: localhost", "Content-Length: 5"]);
        assert!(request.body.is_empty());
        assert_eq!(request.content_length().unwrap(), 5);
    }

    #[test]
    fn test_parse_request_head_empty() {
        assert_eq!(parse_request_head(b"\r\n\r\n").unwrap_err(), Error::EmptyRequest);
        assert_eq!(parse_request_head(b"").unwrap_err(), Error::EmptyRequest);
    }

    #[test]
    fn test_parse_request_head_invalid_utf8() {
        let head = b"GET / HTTP/1.1\r\nX-Test: \xFF\xFF\r\n\r\n";
        assert_eq!(parse_request_head(head).unwrap_err(), Error::InvalidUtf8);
    }

    #[test]
    fn test_parse_request_head_invalid_line() {
        let head = b"BREW /pot HTTP/1.1\r\n\r\n";
        assert!(matches!(parse_request_head(head), Err(Error::InvalidMethod(_))));
    }

    #[test]
    fn test_path_and_query_string() {
        let request = HttpRequest::new(Method::GET, "/calculate-next?num=5", Vec::new());
        assert_eq!(request.path(), "/calculate-next");
        assert_eq!(request.query_string(), "num=5");
        assert_eq!(request.query_params().get("num").unwrap(), "5");

        let request = HttpRequest::new(Method::GET, "/index.html", Vec::new());
        assert_eq!(request.path(), "/index.html");
        assert_eq!(request.query_string(), "");
        assert!(request.query_params().is_empty());
    }

    #[test]
    fn test_path_splits_on_first_question_mark() {
        let request = HttpRequest::new(Method::GET, "/image?image-name=a?b.png", Vec::new());
        assert_eq!(request.path(), "/image");
        assert_eq!(request.query_params().get("image-name").unwrap(), "a?b.png");
    }

    #[test]
    fn test_content_length_case_insensitive() {
        for header in ["content-length: 12", "CONTENT-LENGTH: 12", "Content-Length:12  "] {
            let request = HttpRequest::new(Method::POST, "/upload", vec![header.to_string()]);
            assert_eq!(request.content_length().unwrap(), 12, "{header}");
        }
    }

    #[test]
    fn test_content_length_missing_or_non_positive() {
        let request = HttpRequest::new(Method::POST, "/upload", vec!["Host: x".to_string()]);
        assert_eq!(request.content_length().unwrap(), 0);

        let request = HttpRequest::new(Method::POST, "/upload", vec!["Content-Length: 0".to_string()]);
        assert_eq!(request.content_length().unwrap(), 0);

        let request = HttpRequest::new(Method::POST, "/upload", vec!["Content-Length: -3".to_string()]);
        assert_eq!(request.content_length().unwrap(), 0);
    }

    #[test]
    fn test_content_length_name_must_touch_colon() {
        for header in ["Content-Length : 5", " Content-Length: 5"] {
            let request = HttpRequest::new(Method::POST, "/upload", vec![header.to_string()]);
            assert_eq!(request.content_length().unwrap(), 0, "{header:?}");
        }
    }

    #[test]
    fn test_content_length_not_a_number() {
        let request = HttpRequest::new(Method::POST, "/upload", vec!["Content-Length: lots".to_string()]);
        assert_eq!(
            request.content_length().unwrap_err(),
            Error::InvalidContentLength("lots".to_string())
        );
    }

    #[test]
    fn test_first_content_length_wins() {
        let headers = vec!["Content-Length: 3".to_string(), "Content-Length: 9".to_string()];
        let request = HttpRequest::new(Method::POST, "/upload", headers);
        assert_eq!(request.content_length().unwrap(), 3);
    }

    #[test]
    fn test_with_body() {
        let request = HttpRequest::with_body(Method::POST, "/upload", Vec::new(), b"hello".to_vec());
        assert_eq!(request.body, b"hello");
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::GET.to_string(), "GET");
        assert_eq!(Method::POST.to_string(), "POST");
    }
}
