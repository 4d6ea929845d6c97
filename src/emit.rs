use crate::plan::LaunchPlan;

const SHEBANG: &str = "#!/bin/bash";

/// Renders a launch plan as a POSIX shell script.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptEmitter;

impl ScriptEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Full script text. The layout is consumed by tools that re-run
    /// exported scripts, so section order and spacing are fixed.
    pub fn render(&self, plan: &LaunchPlan) -> String {
        let mut out = String::new();

        out.push_str(SHEBANG);
        out.push('\n');
        self.blank(&mut out);
        self.blank(&mut out);

        self.header(&mut out, "Environment variables");
        for (k, v) in &plan.env {
            self.set_env(&mut out, k, v);
        }

        self.blank(&mut out);
        self.blank(&mut out);
        self.header(&mut out, "Command");
        self.command(&mut out, &plan.argv);

        out
    }

    pub fn header(&self, out: &mut String, title: &str) {
        out.push_str("# ");
        out.push_str(title);
        out.push('\n');
        out.push('\n');
    }

    pub fn blank(&self, out: &mut String) {
        out.push('\n');
    }

    /// Value goes inside double quotes as is; `$VAR` references stay live.
    pub fn set_env(&self, out: &mut String, key: &str, value: &str) {
        out.push_str("export ");
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push_str("\"\n");
    }

    /// The whole command line as one shell word, no trailing newline.
    pub fn command(&self, out: &mut String, argv: &[String]) {
        out.push_str(&quote_posix_single(&argv.join(" ")));
    }
}

// -------------------- quoting helpers --------------------

fn is_shell_safe(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

/// Single-quote `s` unless every char is shell-safe. Embedded `'` become `'"'"'`.
pub fn quote_posix_single(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    if s.chars().all(is_shell_safe) {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push_str("'\"'\"'");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}
