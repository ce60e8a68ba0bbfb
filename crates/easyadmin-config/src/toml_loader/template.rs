//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Easy Admin channel configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[host]
# origin = "http://localhost:3000"
# Client origins allowed to call host operations. "null" admits frames
# loaded from file://.
allowed_origins = ["http://localhost:3000", "http://127.0.0.1:3000", "null"]
# max_args = 32                # 0-1024
# max_depth = 32               # 1-128
# max_payload_bytes = 1048576  # 1-67108864

[client]
# origin = "http://localhost:3000"
host_origin = "http://localhost:3000"
# Reject calls that get no response within this many milliseconds.
# Unset: wait forever.
# call_timeout_ms = 30000      # 1-3600000
"##
}
