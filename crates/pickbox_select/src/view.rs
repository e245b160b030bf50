//! Presentation layer
//!
//! [`SelectView`] is a plain description of what the select shows, derived
//! from the controller and nothing else. Hosts map it onto their own element
//! tree; [`SelectView::render_text`] draws it as text for terminals and
//! snapshot tests.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ 5                       × ▴ │   control (input, clear, caret)
//! └──────────────────────────────┘
//!   ▸ 5                            option rows, active marked ▸,
//!     50                           selected marked ✓
//! ```

use std::fmt::Write as _;

use crate::controller::SelectController;
use crate::placement::Placement;

/// Text of the single row shown when nothing matches
pub const NO_MATCHES: &str = "No matches";

/// Root element attributes (`role="combobox"`)
#[derive(Clone, Debug, PartialEq)]
pub struct RootView {
    pub expanded: bool,
    pub controls: String,
    pub active_descendant: Option<String>,
    pub has_selected: bool,
    pub focused: bool,
}

/// The control: text input plus clear and caret affordances
#[derive(Clone, Debug, PartialEq)]
pub struct ControlView {
    /// Input value
    pub text: String,
    pub placeholder: String,
    /// The input only accepts typing while open
    pub read_only: bool,
    /// Whether the clear ("×") button is shown
    pub show_clear: bool,
    /// Accessible label of the caret
    pub caret_label: &'static str,
}

/// One option row (`role="option"`)
#[derive(Clone, Debug, PartialEq)]
pub struct OptionView {
    /// Index in the filtered list
    pub index: usize,
    pub id: String,
    pub name: String,
    pub value: String,
    /// `aria-selected`
    pub selected: bool,
    /// Keyboard highlight
    pub active: bool,
}

/// The popover list (`role="listbox"`)
#[derive(Clone, Debug, PartialEq)]
pub struct DropdownView {
    pub id: String,
    pub placement: Placement,
    pub max_height: f32,
    pub scroll_top: f32,
    /// Empty when nothing matches; render [`NO_MATCHES`] then
    pub options: Vec<OptionView>,
}

/// Everything the select renders
#[derive(Clone, Debug, PartialEq)]
pub struct SelectView {
    pub root: RootView,
    pub control: ControlView,
    /// Present only while open
    pub dropdown: Option<DropdownView>,
}

impl SelectView {
    /// Derive the view from controller state
    pub fn from_controller(select: &SelectController) -> Self {
        let open = select.is_open();
        let has_selected = select.has_selected();

        let root = RootView {
            expanded: open,
            controls: select.list_id().to_string(),
            active_descendant: select.active_id(),
            has_selected,
            focused: select.is_focused(),
        };

        let control = ControlView {
            text: select.display_text().to_string(),
            placeholder: select.placeholder().to_string(),
            read_only: !open,
            show_clear: has_selected,
            caret_label: if open { "Close list" } else { "Open list" },
        };

        let dropdown = open.then(|| {
            let selected_value = select.value();
            let active = select.active_index();
            let options = select
                .filtered()
                .enumerate()
                .map(|(index, opt)| OptionView {
                    index,
                    id: select.option_id(index),
                    name: opt.name.clone(),
                    value: opt.value.clone(),
                    selected: Some(opt.value.as_str()) == selected_value,
                    active: Some(index) == active,
                })
                .collect();
            DropdownView {
                id: select.list_id().to_string(),
                placement: select.placement(),
                max_height: crate::placement::POPOVER_MAX_HEIGHT,
                scroll_top: select.list_viewport().scroll_top(),
                options,
            }
        });

        Self {
            root,
            control,
            dropdown,
        }
    }

    /// Draw the select as text
    ///
    /// Only rows inside the popover's visible window are drawn, so a
    /// thousand-option catalog renders as a handful of lines.
    pub fn render_text(&self, select: &SelectController) -> String {
        let mut out = String::new();
        let control = self.render_control();

        match &self.dropdown {
            Some(dropdown) if dropdown.placement == Placement::Up => {
                self.render_rows(&mut out, dropdown, select);
                out.push_str(&control);
            }
            Some(dropdown) => {
                out.push_str(&control);
                self.render_rows(&mut out, dropdown, select);
            }
            None => out.push_str(&control),
        }
        out
    }

    fn render_control(&self) -> String {
        let text = if self.control.text.is_empty() {
            format!("({})", self.control.placeholder)
        } else {
            self.control.text.clone()
        };
        let clear = if self.control.show_clear { "×" } else { " " };
        let caret = if self.root.expanded { "▴" } else { "▾" };
        format!("[ {:<28} {} {} ]\n", text, clear, caret)
    }

    fn render_rows(&self, out: &mut String, dropdown: &DropdownView, select: &SelectController) {
        if dropdown.options.is_empty() {
            let _ = writeln!(out, "    {}", NO_MATCHES);
            return;
        }
        let range = select.list_viewport().visible_range();
        if range.start > 0 {
            let _ = writeln!(out, "    … {} above", range.start);
        }
        for row in &dropdown.options[range.clone()] {
            let marker = if row.active { "▸" } else { " " };
            let check = if row.selected { "✓" } else { " " };
            let _ = writeln!(out, "  {}{} {}", marker, check, row.name);
        }
        let below = dropdown.options.len().saturating_sub(range.end);
        if below > 0 {
            let _ = writeln!(out, "    … {} below", below);
        }
    }
}

impl SelectController {
    /// Derive the current view
    pub fn view(&self) -> SelectView {
        SelectView::from_controller(self)
    }
}
