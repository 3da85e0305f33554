//! Port range notation: `1-3,5,7-9`.

use crate::error::{Error, Result};

/// Collapse an ascending, duplicate-free slice of ports into range notation.
///
/// Consecutive ports share the same `port - index` key, so a run ends as soon
/// as that key changes. Runs of two or more ports render as `lo-hi`, single
/// ports render bare. An empty slice yields an empty string.
pub fn compress_ranges(ports: &[u16]) -> String {
    let mut runs: Vec<(u16, u16)> = Vec::new();
    let mut run_key: Option<i64> = None;

    for (index, &port) in ports.iter().enumerate() {
        let key = i64::from(port) - index as i64;
        if run_key == Some(key) {
            if let Some(run) = runs.last_mut() {
                run.1 = port;
                continue;
            }
        }
        runs.push((port, port));
        run_key = Some(key);
    }

    runs.iter()
        .map(|&(lo, hi)| {
            if lo == hi {
                lo.to_string()
            } else {
                format!("{}-{}", lo, hi)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Expand range notation back into the list of ports it covers, in order.
pub fn expand_ranges(spec: &str) -> Result<Vec<u16>> {
    let mut ports = Vec::new();

    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return Err(Error::InvalidRange(spec.to_string()));
        }

        if let Some((lo, hi)) = part.split_once('-') {
            let lo = parse_port(lo, spec)?;
            let hi = parse_port(hi, spec)?;
            if lo > hi {
                return Err(Error::InvalidRange(format!("{} (start above end)", part)));
            }
            ports.extend(lo..=hi);
        } else {
            ports.push(parse_port(part, spec)?);
        }
    }

    Ok(ports)
}

fn parse_port(token: &str, spec: &str) -> Result<u16> {
    token.trim()
        .parse::<u16>()
        .map_err(|_| Error::InvalidRange(spec.to_string()))
}
