//! Line-oriented command console on stdin.
//!
//! Lines are read on a background thread and handed to the main loop over
//! a channel; parsing is pure so it can be tested without a window.

use std::io::BufRead;
use std::sync::mpsc;

use oneai_tiling::{Direction, Position, RatioPolicy};

pub const HELP: &str = "\
commands:
  open <app>                         open an app in a new pane
  split <h|v> <app> [before|after]   split the active pane
  close [tab]                        close a tab (default: active)
  focus <tab> | next | prev          change the active tab
  detach <tab> | attach <tab>        hide a pane / show it again
  resize <split> <r1> <r2> ...       set a split's ratios
  move <tab> <split> <index> [keep]  move a pane (keep: preserve ratios)
  rename <tab> <title>               retitle a tab
  tabs | apps | layout               list tabs, apps, or the pane tree
  save                               save the workspace now
  send <text>                        send to every visible tab
  send@<tab,tab> <text>              send to the listed tabs
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open {
        app_id: String,
    },
    Split {
        direction: Direction,
        app_id: String,
        position: Position,
    },
    Close {
        tab_id: Option<String>,
    },
    Focus {
        tab_id: String,
    },
    FocusNext,
    FocusPrev,
    Detach {
        tab_id: String,
    },
    Attach {
        tab_id: String,
    },
    Resize {
        split_id: String,
        ratios: Vec<f64>,
    },
    Move {
        tab_id: String,
        split_id: String,
        index: usize,
        policy: RatioPolicy,
    },
    Rename {
        tab_id: String,
        title: String,
    },
    Tabs,
    Apps,
    Layout,
    Save,
    /// `targets: None` means every visible tab.
    Send {
        targets: Option<Vec<String>>,
        text: String,
    },
    Help,
    Quit,
}

/// Parse one console line.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    if let Some(targets) = word.strip_prefix("send@") {
        return parse_send(Some(targets), rest);
    }

    match word {
        "" => Err("empty command".into()),
        "open" => match args.as_slice() {
            [app] => Ok(Command::Open {
                app_id: app.to_string(),
            }),
            _ => Err("usage: open <app>".into()),
        },
        "split" => parse_split(&args),
        "close" => match args.as_slice() {
            [] => Ok(Command::Close { tab_id: None }),
            [tab] => Ok(Command::Close {
                tab_id: Some(tab.to_string()),
            }),
            _ => Err("usage: close [tab]".into()),
        },
        "focus" => match args.as_slice() {
            [tab] => Ok(Command::Focus {
                tab_id: tab.to_string(),
            }),
            _ => Err("usage: focus <tab>".into()),
        },
        "next" => Ok(Command::FocusNext),
        "prev" => Ok(Command::FocusPrev),
        "detach" | "attach" => match args.as_slice() {
            [tab] if word == "detach" => Ok(Command::Detach {
                tab_id: tab.to_string(),
            }),
            [tab] => Ok(Command::Attach {
                tab_id: tab.to_string(),
            }),
            _ => Err(format!("usage: {word} <tab>")),
        },
        "resize" => parse_resize(&args),
        "move" => parse_move(&args),
        "rename" => match rest.split_once(char::is_whitespace) {
            Some((tab, title)) if !title.trim().is_empty() => Ok(Command::Rename {
                tab_id: tab.to_string(),
                title: title.trim().to_string(),
            }),
            _ => Err("usage: rename <tab> <title>".into()),
        },
        "tabs" => Ok(Command::Tabs),
        "apps" => Ok(Command::Apps),
        "layout" => Ok(Command::Layout),
        "save" => Ok(Command::Save),
        "send" => parse_send(None, rest),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {other} (try `help`)")),
    }
}

fn parse_split(args: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: split <h|v> <app> [before|after]";
    let (dir, app, pos) = match args {
        [dir, app] => (*dir, *app, None),
        [dir, app, pos] => (*dir, *app, Some(*pos)),
        _ => return Err(USAGE.into()),
    };
    let direction = match dir {
        "h" | "horizontal" => Direction::Horizontal,
        "v" | "vertical" => Direction::Vertical,
        _ => return Err(USAGE.into()),
    };
    let position = match pos {
        None | Some("after") => Position::After,
        Some("before") => Position::Before,
        Some(_) => return Err(USAGE.into()),
    };
    Ok(Command::Split {
        direction,
        app_id: app.to_string(),
        position,
    })
}

fn parse_resize(args: &[&str]) -> Result<Command, String> {
    let [split, ratios @ ..] = args else {
        return Err("usage: resize <split> <r1> <r2> ...".into());
    };
    if ratios.len() < 2 {
        return Err("usage: resize <split> <r1> <r2> ...".into());
    }
    let ratios = ratios
        .iter()
        .map(|r| r.parse::<f64>().map_err(|_| format!("not a number: {r}")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Command::Resize {
        split_id: split.to_string(),
        ratios,
    })
}

fn parse_move(args: &[&str]) -> Result<Command, String> {
    const USAGE: &str = "usage: move <tab> <split> <index> [keep]";
    let (tab, split, index, policy) = match args {
        [tab, split, index] => (*tab, *split, *index, RatioPolicy::Equalize),
        [tab, split, index, "keep"] => (*tab, *split, *index, RatioPolicy::Preserve),
        _ => return Err(USAGE.into()),
    };
    let index = index
        .parse::<usize>()
        .map_err(|_| format!("not an index: {index}"))?;
    Ok(Command::Move {
        tab_id: tab.to_string(),
        split_id: split.to_string(),
        index,
        policy,
    })
}

/// Blank text is refused here so the broadcaster never sees it.
fn parse_send(targets: Option<&str>, text: &str) -> Result<Command, String> {
    if text.trim().is_empty() {
        return Err("nothing to send".into());
    }
    let targets = match targets {
        None => None,
        Some(list) => {
            let ids: Vec<String> = list
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect();
            if ids.is_empty() {
                return Err("usage: send@<tab,tab> <text>".into());
            }
            Some(ids)
        }
    };
    Ok(Command::Send {
        targets,
        text: text.to_string(),
    })
}

/// Read stdin lines on a background thread. The channel closes at EOF.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("oneai-console".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
            tracing::debug!("Console input closed");
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "Failed to start console reader");
    }
    rx
}
