use custom_error::custom_error;

custom_error! {
    /// Failures of a single SonarQube API call or of the pending-task wait.
    pub SonarError
    Request{source: reqwest::Error} = "request failed: {source}",
    Url{source: url::ParseError} = "invalid server URL: {source}",
    Decode{source: serde_json::Error, body: String} = "failed to decode response: {source}",
    Api{messages: String, body: String} = "server returned errors: {messages}",
    Timeout{seconds: u64} = "timeout reached after {seconds}s",
    Output{source: std::io::Error} = "failed to write progress: {source}",
}

custom_error! {
    /// Reasons the run settings cannot be assembled; all of them abort before any request.
    pub ConfigError
    MissingArguments = "Project key and token arguments are required!",
    InvalidRefreshPeriod = "Refresh period must be at least 1 second",
    Expand{value: String, reason: String} = "Failed to expand environment variable in '{value}': {reason}",
}
