//! The automation script injected into every hosted page, and the calls
//! Rust makes into it.
//!
//! Each call carries a numeric request id and a random reply token. The
//! page answers every call with exactly one `automation_reply` IPC message
//! echoing both; replies without the right token are ignored. Failures are reported
//! as `error` strings; the prefixes `invalid_selector:` and `stale:` name
//! the two failures the dispatcher treats specially.

use serde_json::{json, Value};

pub const INVALID_SELECTOR_PREFIX: &str = "invalid_selector:";
pub const STALE_PREFIX: &str = "stale:";

/// Installs `window.__oneai`. Runs before page scripts on every navigation.
pub const AUTOMATION_INIT_SCRIPT: &str = r#"
(function() {
    if (window.__oneai) { return; }
    var elements = {};
    var nextHandle = 1;

    function reply(call, ok, value, error) {
        window.ipc.postMessage(JSON.stringify({
            kind: "automation_reply",
            payload: {
                request_id: call.id,
                token: call.token,
                ok: ok,
                value: value === undefined ? null : value,
                error: error || null
            }
        }));
    }

    function run(call, fn) {
        try {
            reply(call, true, fn());
        } catch (e) {
            reply(call, false, null, String((e && e.message) || e));
        }
    }

    function kindOf(el) {
        return (el.tagName === "TEXTAREA" || el.tagName === "INPUT") ? "native_field" : "rich_text";
    }

    function isVisible(el) {
        var rect = el.getBoundingClientRect();
        var style = window.getComputedStyle(el);
        return rect.width > 0 && rect.height > 0 &&
            style.visibility !== "hidden" && style.display !== "none";
    }

    function isEnabled(el) {
        return !el.disabled && el.getAttribute("aria-disabled") !== "true";
    }

    function handleFor(el) {
        var handle = el.getAttribute("data-oneai-handle");
        if (!handle) {
            handle = "el-" + (nextHandle++);
            el.setAttribute("data-oneai-handle", handle);
        }
        elements[handle] = el;
        return handle;
    }

    function lookup(handle) {
        var el = elements[handle];
        if (!el || !el.isConnected) {
            delete elements[handle];
            throw new Error("stale:" + handle);
        }
        return el;
    }

    function key(el, type) {
        el.dispatchEvent(new KeyboardEvent(type, {
            key: "Enter", code: "Enter", keyCode: 13, which: 13,
            bubbles: true, cancelable: true
        }));
    }

    window.__oneai = {
        query: function(call, selector) {
            run(call, function() {
                var el;
                try {
                    el = document.querySelector(selector);
                } catch (e) {
                    throw new Error("invalid_selector:" + selector);
                }
                if (!el) { return null; }
                return {
                    handle: handleFor(el),
                    kind: kindOf(el),
                    visible: isVisible(el),
                    enabled: isEnabled(el)
                };
            });
        },

        setText: function(call, handle, text) {
            run(call, function() {
                var el = lookup(handle);
                el.focus();
                if (kindOf(el) === "native_field") {
                    var proto = el.tagName === "TEXTAREA"
                        ? HTMLTextAreaElement.prototype
                        : HTMLInputElement.prototype;
                    Object.getOwnPropertyDescriptor(proto, "value").set.call(el, text);
                    el.dispatchEvent(new Event("input", { bubbles: true }));
                    el.dispatchEvent(new Event("change", { bubbles: true }));
                } else {
                    document.execCommand("selectAll", false, null);
                    if (!document.execCommand("insertText", false, text)) {
                        el.textContent = text;
                        el.dispatchEvent(new InputEvent("input", {
                            bubbles: true, data: text, inputType: "insertText"
                        }));
                    }
                }
                return null;
            });
        },

        pressEnter: function(call, handle) {
            run(call, function() {
                var el = lookup(handle);
                key(el, "keydown");
                key(el, "keypress");
                key(el, "keyup");
                return null;
            });
        },

        click: function(call, handle) {
            run(call, function() {
                lookup(handle).click();
                return null;
            });
        }
    };
})();
"#;

/// One call into `window.__oneai`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCall {
    Query { selector: String },
    SetText { handle: String, text: String },
    PressEnter { handle: String },
    Click { handle: String },
}

impl ScriptCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Query { .. } => "query",
            Self::SetText { .. } => "setText",
            Self::PressEnter { .. } => "pressEnter",
            Self::Click { .. } => "click",
        }
    }

    /// JavaScript source for this call. A page without the automation
    /// object evaluates to a no-op, which the caller sees as a missing reply.
    pub fn render(&self, request_id: u64, token: &str) -> String {
        let args = match self {
            Self::Query { selector } => js_string(selector),
            Self::SetText { handle, text } => format!("{}, {}", js_string(handle), js_string(text)),
            Self::PressEnter { handle } | Self::Click { handle } => js_string(handle),
        };
        let call = json!({ "id": request_id, "token": token });
        format!(
            "window.__oneai && window.__oneai.{}({call}, {args});",
            self.name()
        )
    }
}

/// A JSON string literal, which is also a valid JS string literal.
fn js_string(s: &str) -> String {
    Value::from(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_renders_with_request_id() {
        let call = ScriptCall::Query {
            selector: "textarea".into(),
        };
        assert_eq!(
            call.render(12, "k3y"),
            r#"window.__oneai && window.__oneai.query({"id":12,"token":"k3y"}, "textarea");"#
        );
    }

    #[test]
    fn arguments_are_escaped() {
        let call = ScriptCall::SetText {
            handle: "el-1".into(),
            text: "say \"hi\"\n</script>".into(),
        };
        let js = call.render(1, "t");
        assert!(js.contains(r#""say \"hi\"\n</script>""#), "{js}");
        assert!(js.starts_with(r#"window.__oneai && window.__oneai.setText({"id":1,"token":"t"}, "el-1", "#));
    }

    #[test]
    fn selector_quotes_survive() {
        let call = ScriptCall::Query {
            selector: "textarea[placeholder*=\"DeepSeek\"]".into(),
        };
        assert!(call.render(2, "t").contains(r#""textarea[placeholder*=\"DeepSeek\"]""#));
    }

    #[test]
    fn element_calls_name_their_function() {
        let enter = ScriptCall::PressEnter { handle: "el-2".into() };
        let click = ScriptCall::Click { handle: "el-3".into() };
        assert!(enter.render(5, "a").contains(r#".pressEnter({"id":5,"token":"a"}, "el-2")"#));
        assert!(click.render(6, "b").contains(r#".click({"id":6,"token":"b"}, "el-3")"#));
    }

    #[test]
    fn init_script_installs_every_call() {
        for name in ["query:", "setText:", "pressEnter:", "click:"] {
            assert!(AUTOMATION_INIT_SCRIPT.contains(name), "{name}");
        }
        assert!(AUTOMATION_INIT_SCRIPT.contains("automation_reply"));
        assert!(AUTOMATION_INIT_SCRIPT.contains("token: call.token"));
        assert!(AUTOMATION_INIT_SCRIPT.contains(INVALID_SELECTOR_PREFIX));
        assert!(AUTOMATION_INIT_SCRIPT.contains(STALE_PREFIX));
    }
}
