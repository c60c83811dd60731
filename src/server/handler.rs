//! The computed endpoints: next integer, triangle area, upload and image.
//!
//! Each handler takes the parsed query parameters and returns a complete
//! response; none of them can fail in a way the caller has to handle.

use std::collections::HashMap;
use std::path::Path;

use log::{error, info, warn};
use tokio::fs;

use crate::server::config::ServerConfig;
use crate::server::response::{HttpResponse, StatusCode};
use crate::server::static_files::{safe_join, serve_file};

/// Query parameter names.
pub const NUM_PARAM: &str = "num";
pub const HEIGHT_PARAM: &str = "height";
pub const WIDTH_PARAM: &str = "width";
pub const FILE_NAME_PARAM: &str = "file-name";
pub const IMAGE_NAME_PARAM: &str = "image-name";

/// `/calculate-next?num=N` answers `N + 1`.
pub fn calculate_next(params: &HashMap<String, String>) -> HttpResponse {
    let Some(raw) = params.get(NUM_PARAM) else {
        warn!("400 BAD REQUEST - missing {NUM_PARAM} parameter");
        return HttpResponse::new(StatusCode::BadRequest);
    };

    match increment_integer(raw) {
        Some(next) => {
            info!("calculate-next: {raw} -> {next}");
            HttpResponse::text(next)
        }
        None => {
            warn!("400 BAD REQUEST - {NUM_PARAM} is not an integer: {raw}");
            HttpResponse::new(StatusCode::BadRequest)
        }
    }
}

/// `/calculate-area?height=H&width=W` answers the triangle area `H * W / 2`.
pub fn calculate_area(params: &HashMap<String, String>) -> HttpResponse {
    let (Some(raw_height), Some(raw_width)) = (params.get(HEIGHT_PARAM), params.get(WIDTH_PARAM)) else {
        warn!("400 BAD REQUEST - missing {HEIGHT_PARAM} or {WIDTH_PARAM} parameter");
        return HttpResponse::new(StatusCode::BadRequest);
    };

    let (Ok(height), Ok(width)) = (raw_height.parse::<f64>(), raw_width.parse::<f64>()) else {
        warn!("400 BAD REQUEST - {HEIGHT_PARAM} or {WIDTH_PARAM} is not a number");
        return HttpResponse::new(StatusCode::BadRequest);
    };

    let area = format_float(height * width / 2.0);
    info!("calculate-area: height={height}, width={width} -> {area}");
    HttpResponse::text(area)
}

/// `POST /upload?file-name=NAME` stores the body verbatim under the upload directory.
pub async fn upload(params: &HashMap<String, String>, body: &[u8], upload_root: &Path) -> HttpResponse {
    let Some(file_name) = params.get(FILE_NAME_PARAM) else {
        warn!("400 BAD REQUEST - missing {FILE_NAME_PARAM} parameter");
        return HttpResponse::new(StatusCode::BadRequest);
    };

    let Some(path) = safe_join(upload_root, file_name) else {
        error!("500 INTERNAL SERVER ERROR - invalid upload name: {file_name}");
        return HttpResponse::new(StatusCode::InternalServerError);
    };

    match fs::write(&path, body).await {
        Ok(()) => {
            info!("File uploaded: {file_name} ({} bytes)", body.len());
            HttpResponse::new(StatusCode::Ok)
        }
        Err(e) => {
            error!("500 INTERNAL SERVER ERROR - writing {}: {e}", path.display());
            HttpResponse::new(StatusCode::InternalServerError)
        }
    }
}

/// `/image?image-name=NAME` returns an uploaded file.
///
/// A missing `image-name` is a 404, not a 400.
pub async fn image(params: &HashMap<String, String>, config: &ServerConfig) -> HttpResponse {
    let Some(image_name) = params.get(IMAGE_NAME_PARAM) else {
        warn!("404 NOT FOUND - missing {IMAGE_NAME_PARAM} parameter");
        return HttpResponse::new(StatusCode::NotFound);
    };

    serve_file(&config.upload_root(), image_name, config).await
}

/// Add one to a decimal integer of any size.
///
/// Accepts surrounding whitespace, an optional sign, and single `_`
/// separators between digits. Anything else yields `None`.
pub fn increment_integer(raw: &str) -> Option<String> {
    let raw = raw.trim();
    let (negative, unsigned) = match raw.as_bytes().first().copied()? {
        b'-' => (true, &raw[1..]),
        b'+' => (false, &raw[1..]),
        _ => (false, raw),
    };
    let well_formed = unsigned
        .split('_')
        .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if !well_formed {
        return None;
    }

    // Least significant digit first
    let mut magnitude: Vec<u8> = unsigned.bytes().rev().filter(|&b| b != b'_').map(|b| b - b'0').collect();
    strip_leading_zeros(&mut magnitude);
    let negative = negative && magnitude != [0u8];

    if negative {
        // -m + 1 == -(m - 1)
        for digit in magnitude.iter_mut() {
            if *digit > 0 {
                *digit -= 1;
                break;
            }
            *digit = 9;
        }
        strip_leading_zeros(&mut magnitude);
    } else {
        let mut carry = true;
        for digit in magnitude.iter_mut() {
            if *digit < 9 {
                *digit += 1;
                carry = false;
                break;
            }
            *digit = 0;
        }
        if carry {
            magnitude.push(1);
        }
    }

    let sign = if negative && magnitude != [0u8] { "-" } else { "" };
    let digits: String = magnitude.iter().rev().map(|d| char::from(b'0' + d)).collect();
    Some(format!("{sign}{digits}"))
}

fn strip_leading_zeros(magnitude: &mut Vec<u8>) {
    while magnitude.len() > 1 && magnitude.last() == Some(&0) {
        magnitude.pop();
    }
}

/// Format a float as its shortest round-trip decimal form.
///
/// Integral values keep a trailing `.0`; magnitudes outside `[1e-4, 1e16)`
/// use an exponent with an explicit sign and at least two digits.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        let repr = if value > 0.0 { "inf" } else { "-inf" };
        return repr.to_string();
    }

    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}
