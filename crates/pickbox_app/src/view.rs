//! Text rendering of the whole demo screen

use std::fmt::Write as _;

use crate::api::{OptionSource, SelectionSink, SubmitMode};
use crate::app::App;
use crate::slices::{Notice, NoticeKind};

fn render_notice(out: &mut String, notice: &Notice) {
    let mark = match notice.kind {
        NoticeKind::Success => "✔",
        NoticeKind::Error => "✘",
    };
    let _ = writeln!(out, "{} {}", mark, notice.text);
}

impl<B: OptionSource + SelectionSink> App<B> {
    /// Status line, messages, and every widget, top corners first
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.status_line());
        if let Some(error) = self.options().error {
            let _ = writeln!(out, "Error: {}", error);
        }

        let selection = self.selection();
        let _ = writeln!(
            out,
            "Selected: {}{}",
            selection.value.as_deref().unwrap_or("none"),
            if selection.submitting { " (submitting…)" } else { "" }
        );
        if self.submit_disabled() {
            let _ = writeln!(out, "Submit: disabled");
        }
        for notice in self.visible_messages() {
            render_notice(&mut out, &notice);
        }

        for case in self.cases() {
            let button = match case.submit_mode {
                SubmitMode::Ok => "Submit",
                SubmitMode::Error => "Error",
            };
            let _ = writeln!(out, "\n{}: [{}]", case.corner.label(), button);
            out.push_str(&case.select.view().render_text(&case.select));
        }
        out
    }
}
