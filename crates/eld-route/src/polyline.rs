//! Encoded polyline codec (1e-5 precision) and positioning along a decoded
//! route. Used to carry route geometry through the API untouched and to place
//! stops at a given distance along the way.
use crate::error::RouteError;
use crate::geo::haversine;

/// Decode an encoded polyline into `(latitude, longitude)` pairs.
pub fn decode(polyline: &str) -> Result<Vec<(f64, f64)>, RouteError> {
    let bytes = polyline.as_bytes();
    let mut coords = Vec::new();
    let mut index = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while index < bytes.len() {
        let (dlat, next) = decode_value(bytes, index)?;
        let (dlng, next) = decode_value(bytes, next)?;
        lat += dlat;
        lng += dlng;
        coords.push((lat as f64 / 1e5, lng as f64 / 1e5));
        index = next;
    }
    Ok(coords)
}

fn decode_value(bytes: &[u8], mut index: usize) -> Result<(i64, usize), RouteError> {
    let mut shift = 0;
    let mut result = 0i64;
    loop {
        let byte = *bytes
            .get(index)
            .ok_or_else(|| RouteError::Polyline("truncated polyline".to_string()))?
            as i64
            - 63;
        index += 1;
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }
    let delta = if result & 1 != 0 { !(result >> 1) } else { result >> 1 };
    Ok((delta, index))
}

/// Encode `(latitude, longitude)` pairs as a polyline string.
pub fn encode(coords: &[(f64, f64)]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;
    for (lat, lng) in coords {
        let lat_e5 = (lat * 1e5).round() as i64;
        let lng_e5 = (lng * 1e5).round() as i64;
        encode_value(lat_e5 - prev_lat, &mut out);
        encode_value(lng_e5 - prev_lng, &mut out);
        prev_lat = lat_e5;
        prev_lng = lng_e5;
    }
    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = value << 1;
    if value < 0 {
        v = !v;
    }
    while v >= 0x20 {
        out.push(((0x20 | (v & 0x1f)) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}

/// Coordinate at `target_miles` along the decoded route, interpolated within
/// the containing segment. Returns the final point when the target exceeds
/// the route, `None` when the geometry is unusable.
pub fn coordinate_at_distance(coords: &[(f64, f64)], target_miles: f64) -> Option<(f64, f64)> {
    if coords.len() < 2 || target_miles <= 0.0 {
        return coords.first().copied();
    }

    let mut travelled = 0.0;
    for pair in coords.windows(2) {
        let (lat1, lng1) = pair[0];
        let (lat2, lng2) = pair[1];
        let segment = haversine(lat1, lng1, lat2, lng2);
        if travelled + segment >= target_miles {
            let ratio = if segment > 0.0 {
                (target_miles - travelled) / segment
            } else {
                0.0
            };
            return Some((lat1 + (lat2 - lat1) * ratio, lng1 + (lng2 - lng1) * ratio));
        }
        travelled += segment;
    }
    coords.last().copied()
}
