//! utterances comment widget.
//!
//! utterances stores each page's comments in a GitHub issue. Embedding it is a
//! single script tag inside the container it renders into:
//!
//! ```html
//! <div id="comments">
//!   <script src="https://utteranc.es/client.js" async repo="owner/name"
//!           issue-term="pathname" label="Comment" theme="dark-blue"
//!           crossorigin="anonymous"></script>
//! </div>
//! ```

use crate::config::CommentsConfig;
use maud::{Markup, html};

pub const UTTERANCES_CLIENT: &str = "https://utteranc.es/client.js";

/// Element id of the widget container.
pub const COMMENTS_NODE_ID: &str = "comments";

/// Render the widget, or nothing when comments are disabled.
pub fn comments_widget(config: &CommentsConfig) -> Markup {
    if !config.enabled {
        return html! {};
    }
    html! {
        div id=(COMMENTS_NODE_ID) {
            script
                src=(UTTERANCES_CLIENT)
                async
                repo=(config.repo)
                issue-term=(config.issue_term)
                label=(config.label)
                theme=(config.theme)
                crossorigin="anonymous" {}
        }
    }
}
