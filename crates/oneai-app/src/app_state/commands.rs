//! Console commands applied to the workspace.

use std::fmt::Write as _;

use oneai_tiling::{Direction, LayoutNode, LayoutTree, WorkspaceError};

use crate::console::{self, Command, HELP};

use super::core::OneAiApp;

fn describe(e: WorkspaceError) -> String {
    e.to_string()
}

impl OneAiApp {
    /// Parse and run one console line, printing the reply.
    pub(super) fn handle_console_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        let reply = console::parse(line).and_then(|command| self.execute(command));
        match reply {
            Ok(text) if text.is_empty() => {}
            Ok(text) => println!("{text}"),
            Err(e) => println!("error: {e}"),
        }
    }

    pub(super) fn execute(&mut self, command: Command) -> Result<String, String> {
        tracing::debug!(?command, "Console command");
        let reply = match command {
            Command::Open { app_id } => {
                let tab_id = self
                    .workspace
                    .open_app(&self.catalog, &app_id)
                    .map_err(describe)?;
                self.after_change();
                format!("opened {tab_id}")
            }
            Command::Split {
                direction,
                app_id,
                position,
            } => {
                let target = self
                    .workspace
                    .active_tab_id()
                    .cloned()
                    .ok_or("no active tab to split")?;
                let tab_id = self
                    .workspace
                    .split_pane(&self.catalog, &target, direction, &app_id, position)
                    .map_err(describe)?;
                self.after_change();
                format!("opened {tab_id} next to {target}")
            }
            Command::Close { tab_id } => {
                let tab_id = tab_id
                    .or_else(|| self.workspace.active_tab_id().cloned())
                    .ok_or("no active tab to close")?;
                let tab = self.workspace.close_tab(&tab_id).map_err(describe)?;
                self.after_change();
                format!("closed {}", tab.id)
            }
            Command::Focus { tab_id } => {
                self.workspace.set_active(&tab_id).map_err(describe)?;
                self.after_change();
                format!("active: {tab_id}")
            }
            Command::FocusNext | Command::FocusPrev => {
                let moved = if command == Command::FocusNext {
                    self.workspace.focus_next()
                } else {
                    self.workspace.focus_prev()
                };
                if !moved {
                    return Ok("nothing else to focus".into());
                }
                self.after_change();
                format!(
                    "active: {}",
                    self.workspace.active_tab_id().map_or("-", String::as_str)
                )
            }
            Command::Detach { tab_id } => {
                self.workspace.detach_tab(&tab_id).map_err(describe)?;
                self.after_change();
                format!("detached {tab_id}")
            }
            Command::Attach { tab_id } => {
                self.workspace.attach_tab(&tab_id).map_err(describe)?;
                self.after_change();
                format!("attached {tab_id}")
            }
            Command::Resize { split_id, ratios } => {
                self.workspace
                    .resize_split(&split_id, &ratios)
                    .map_err(describe)?;
                self.after_change();
                format!("resized {split_id}")
            }
            Command::Move {
                tab_id,
                split_id,
                index,
                policy,
            } => {
                self.workspace
                    .move_tab(&tab_id, &split_id, index, policy)
                    .map_err(describe)?;
                self.after_change();
                format!("moved {tab_id} to {split_id}[{index}]")
            }
            Command::Rename { tab_id, title } => {
                self.workspace
                    .rename_tab(&tab_id, title.as_str())
                    .map_err(describe)?;
                self.after_change();
                format!("renamed {tab_id} to {title:?}")
            }
            Command::Tabs => self.list_tabs(),
            Command::Apps => self.list_apps(),
            Command::Layout => describe_layout(self.workspace.layout()),
            Command::Save => {
                if !self.save_workspace() {
                    return Err("save failed, see log".into());
                }
                "saved".into()
            }
            Command::Send { targets, text } => self.start_broadcast(targets, text)?,
            Command::Help => HELP.into(),
            Command::Quit => {
                self.should_exit = true;
                "bye".into()
            }
        };
        Ok(reply)
    }

    /// Bookkeeping after any successful workspace mutation.
    fn after_change(&mut self) {
        self.mark_dirty();
        self.sync_webviews();
        self.focus_active_webview();
        self.update_window_title();
    }

    fn list_tabs(&self) -> String {
        let active = self.workspace.active_tab_id();
        let mut out = String::new();
        for tab in self.workspace.tabs().iter() {
            let marker = if active == Some(&tab.id) { '*' } else { ' ' };
            let placement = if self.workspace.is_placed(&tab.id) {
                ""
            } else {
                " (detached)"
            };
            let _ = writeln!(
                out,
                "{marker} {}  {}  [{}]{placement}",
                tab.id, tab.title, tab.app_id
            );
        }
        if out.is_empty() {
            return "no tabs".into();
        }
        out.pop();
        out
    }

    fn list_apps(&self) -> String {
        self.catalog
            .iter()
            .map(|app| format!("{:<16} {:<16} {}", app.id, app.display_name, app.url))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Indented rendering of the pane tree with node ids and ratios.
fn describe_layout(tree: &LayoutTree) -> String {
    let Some(root) = tree.root() else {
        return "(empty layout)".into();
    };
    let mut out = String::new();
    write_node(tree, root, 0, None, &mut out);
    out.pop();
    out
}

fn write_node(tree: &LayoutTree, id: &str, depth: usize, ratio: Option<f64>, out: &mut String) {
    let indent = "  ".repeat(depth);
    let share = ratio.map(|r| format!("{r:.3} ")).unwrap_or_default();
    match tree.node(id) {
        Some(LayoutNode::Split {
            direction,
            children,
            ratios,
        }) => {
            let dir = match direction {
                Direction::Horizontal => "horizontal",
                Direction::Vertical => "vertical",
            };
            let _ = writeln!(out, "{indent}{share}split {id} {dir}");
            for (child, r) in children.iter().zip(ratios) {
                write_node(tree, child, depth + 1, Some(*r), out);
            }
        }
        Some(LayoutNode::Leaf { tab_id }) => {
            let _ = writeln!(out, "{indent}{share}{id} -> {tab_id}");
        }
        None => {}
    }
}
