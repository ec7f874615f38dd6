//! Receiver configuration documents.
//!
//! Both receivers listen for HTTP on port 8090 and write whatever they get to
//! `/tmp/app-logs`, where tests read it back.

/// The key of the vector configuration inside its `ConfigMap`.
pub const VECTOR_CONFIG_KEY: &str = "vector.toml";

/// The key of the fluentd configuration inside its `ConfigMap`.
pub const FLUENTD_CONFIG_KEY: &str = "fluent.conf";

/// Port both receivers accept HTTP requests on.
pub const HTTP_RECEIVER_PORT: u16 = 8090;

/// File both receivers write received records to.
pub const RECEIVED_LOGS_PATH: &str = "/tmp/app-logs";

/// Vector receiving ndjson over HTTP.
pub const VECTOR_HTTP_SOURCE_CONF: &str = r#"
[sources.my_source]
type = "http"
address = "127.0.0.1:8090"
encoding = "ndjson"

[sinks.my_sink]
inputs = ["my_source"]
type = "file"
path = "/tmp/app-logs"

[sinks.my_sink.encoding]
codec = "ndjson"
"#;

/// Fluentd receiving records over HTTP.
pub const FLUENTD_HTTP_SOURCE_CONF: &str = r#"
<system>
  log_level debug
</system>
<source>
  @type http
  port 8090
  bind 0.0.0.0
  body_size_limit 32m
  keepalive_timeout 10s
</source>
# send fluentd logs to stdout
<match fluent.**>
  @type stdout
</match>
<match **>
  @type file
  append true
  path /tmp/app.logs
  symlink_path /tmp/app-logs
  <format>
    @type json
  </format>
</match>
"#;
