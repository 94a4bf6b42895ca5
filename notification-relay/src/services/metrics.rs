use metrics::counter;

/// Count one dispatch attempt by delivery method and outcome (`sent` / `failed`).
pub fn record_send(method: &'static str, status: &'static str) {
    counter!(
        "notification_relay_sends_total",
        "method" => method,
        "status" => status
    )
    .increment(1);
}
