//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# chatline configuration
# Only override what you want to change -- missing fields use defaults.
# Command-line flags take precedence over everything here.

[api]
# base_url = "https://api.openai.com/v1"
# key_env = "CHATGPT_API_KEY"
# connect_timeout_secs = 10
# timeout_secs = 120

[defaults]
# model = "text-davinci-003"
# max_tokens = 1024         # 0-4096
# count = 1                 # number of responses to choose from
# temperature = 0.7         # 0.0-2.0
# top_p = 1.0               # 0.0-1.0
# presence_penalty = 0.0    # -2.0-2.0
# frequency_penalty = 0.0   # -2.0-2.0

[prompts]
# dir = "/path/to/prompts"  # <name>.txt files; bundled prompts when unset

[logging]
# level = "chatline=warn"   # tracing filter directive
"##
    .to_string()
}
