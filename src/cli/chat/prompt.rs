use rustyline::{Config, Editor, Result};

pub fn generate_prompt(pending: bool) -> String {
    // The editor never reads while a request is in flight; the pending
    // variant only shows up if a prompt is redrawn mid-cycle.
    if pending { "… ".to_string() } else { "> ".to_string() }
}

pub fn rl() -> Result<Editor<()>> {
    let config = Config::builder()
        .history_ignore_space(true)
        .build();
    Editor::with_config(config)
}
