use super::platform::Platform;

/// Where a latency lives in one flavour of `ping` output.
pub(crate) struct ReplyFormat {
    pub success_marker: &'static str,
    pub value_start: &'static str,
    pub value_end: &'static str,
}

// `ping -n 1` prints "Minimum = 23ms, Maximum = 23ms, Average = 23ms"
pub(crate) const WINDOWS_FORMAT: ReplyFormat = ReplyFormat {
    success_marker: "Reply from",
    value_start: "Average = ",
    value_end: "ms",
};

// iputils prints "time=17.4 ms" on the reply line and "1 received" in the summary
pub(crate) const LINUX_FORMAT: ReplyFormat = ReplyFormat {
    success_marker: "1 received",
    value_start: "time=",
    value_end: " ms",
};

pub fn parse_response(platform: Platform, raw: &str) -> Option<f64> {
    platform.strategy().parse(raw)
}

pub(crate) fn extract_latency(raw: &str, format: &ReplyFormat) -> Option<f64> {
    if !raw.contains(format.success_marker) {
        return None;
    }

    let start = raw.find(format.value_start)? + format.value_start.len();
    let rest = &raw[start..];
    let end = rest.find(format.value_end)?;

    let latency = rest[..end].trim().parse::<f64>().ok()?;
    if latency.is_finite() && latency >= 0.0 {
        Some(latency)
    } else {
        None
    }
}
