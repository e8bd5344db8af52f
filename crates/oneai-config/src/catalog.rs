//! Static catalog of the chat applications OneAI knows how to host.
//!
//! The catalog is read-only at runtime: built-in entries plus any `[[apps]]`
//! entries from the config file, merged once at startup.

use serde::{Deserialize, Serialize};

/// Display metadata for one hosted application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppDescriptor {
    pub id: String,
    pub display_name: String,
    pub url: String,
    /// Logo asset path relative to the bundled assets directory.
    #[serde(default)]
    pub logo: String,
    /// Whether the pane should draw a border around this app.
    #[serde(default)]
    pub bordered: bool,
}

impl AppDescriptor {
    fn builtin(id: &str, display_name: &str, url: &str, logo: &str, bordered: bool) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            url: url.into(),
            logo: format!("apps/{logo}"),
            bordered,
        }
    }
}

/// Ordered application catalog with lookup by id.
#[derive(Debug, Clone)]
pub struct AppCatalog {
    apps: Vec<AppDescriptor>,
}

impl AppCatalog {
    /// The built-in catalog, in menu order.
    pub fn builtin() -> Self {
        let apps = vec![
            AppDescriptor::builtin(
                "deepseek",
                "DeepSeek",
                "https://chat.deepseek.com/",
                "deepseek.png",
                false,
            ),
            AppDescriptor::builtin(
                "tencent-yuanbao",
                "Tencent Yuanbao",
                "https://yuanbao.tencent.com/chat",
                "yuanbao.webp",
                true,
            ),
            AppDescriptor::builtin(
                "moonshot",
                "Kimi",
                "https://kimi.moonshot.cn/",
                "kimi.webp",
                false,
            ),
            AppDescriptor::builtin(
                "doubao",
                "Doubao",
                "https://www.doubao.com/chat/",
                "doubao.png",
                false,
            ),
            AppDescriptor::builtin(
                "dashscope",
                "Tongyi",
                "https://www.tongyi.com/",
                "qwen.png",
                false,
            ),
            AppDescriptor::builtin(
                "minimax",
                "Minimax",
                "https://chat.minimaxi.com/",
                "hailuo.png",
                true,
            ),
            AppDescriptor::builtin(
                "zhipu",
                "Zhipu",
                "https://chatglm.cn/main/alltoolsdetail",
                "zhipu.png",
                true,
            ),
            AppDescriptor::builtin(
                "baichuan",
                "Baichuan",
                "https://ying.baichuan-ai.com/chat",
                "baixiaoying.webp",
                false,
            ),
            AppDescriptor::builtin(
                "stepfun",
                "Stepfun",
                "https://stepfun.com",
                "stepfun.png",
                true,
            ),
            AppDescriptor::builtin(
                "openai",
                "ChatGPT",
                "https://chatgpt.com/",
                "openai.png",
                true,
            ),
            AppDescriptor::builtin(
                "gemini",
                "Gemini",
                "https://gemini.google.com/app",
                "gemini.png",
                false,
            ),
            AppDescriptor::builtin(
                "grok",
                "Grok",
                "https://grok.com",
                "grok.png",
                true,
            ),
            AppDescriptor::builtin(
                "lmarena",
                "lmarena",
                "https://lmarena.ai",
                "lmarena.png",
                true,
            ),
        ];
        Self { apps }
    }

    /// Built-in catalog with config entries layered on top. An entry whose id
    /// matches a built-in replaces it in place; new ids are appended.
    pub fn with_overrides(overrides: &[AppDescriptor]) -> Self {
        let mut catalog = Self::builtin();
        for app in overrides {
            match catalog.apps.iter_mut().find(|a| a.id == app.id) {
                Some(existing) => *existing = app.clone(),
                None => catalog.apps.push(app.clone()),
            }
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&AppDescriptor> {
        self.apps.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Title for a freshly opened tab: the app's display name, or the raw id
    /// for apps the catalog does not know.
    pub fn default_title(&self, id: &str) -> String {
        self.get(id)
            .map(|a| a.display_name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

impl Default for AppCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
