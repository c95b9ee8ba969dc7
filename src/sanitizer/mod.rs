//! HTML sanitization.
//!
//! Retrieved pages are copied into a new, filtered `scraper::Html`: non-content
//! elements are dropped with their whole subtree, empty elements are pruned
//! bottom-up, and whitespace is collapsed. The copy is serialized through
//! html5ever for the extractor and for the `html` field of the response.

use ego_tree::NodeId;
use scraper::node::Text;
use scraper::{ElementRef, Html, Node, StrTendril};

use crate::config::MAX_SANITIZE_DEPTH;

/// Elements removed together with everything inside them.
pub const REMOVED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "meta", "link", "svg", "iframe", "form", "input", "button",
    "nav", "header", "footer",
];

/// Elements kept even when they have no children or text.
const ALWAYS_KEPT: &[&str] = &[
    "html", "head", "body", "img", "br", "hr", "source", "track", "wbr", "area", "col", "embed",
];

/// Sanitizes a raw HTML document.
///
/// Never fails: html5ever parses malformed markup permissively, so the worst
/// case is an empty document skeleton.
pub fn sanitize_html(raw: &str) -> String {
    let source = Html::parse_document(raw);
    let mut cleaned = Html::new_document();
    let root = cleaned.tree.root().id();
    copy_clean(source.root_element(), &mut cleaned, root, 0);

    let mut out = String::from("<!DOCTYPE html>");
    out.push_str(&cleaned.html());
    out
}

/// Appends a filtered copy of `element` under `parent` in `target`.
///
/// Children are copied before the emptiness check, so a wrapper emptied by
/// pruning is detached too. Returns whether the element was kept.
fn copy_clean(element: ElementRef<'_>, target: &mut Html, parent: NodeId, depth: usize) -> bool {
    let name = element.value().name();
    if REMOVED_ELEMENTS.contains(&name) {
        return false;
    }

    let id = match target.tree.get_mut(parent) {
        Some(mut parent) => parent.append(Node::Element(element.value().clone())).id(),
        None => return false,
    };

    let mut has_content = false;
    if depth >= MAX_SANITIZE_DEPTH {
        has_content = append_text(target, id, &visible_text(element));
    } else {
        for child in element.children() {
            let kept = match child.value() {
                Node::Text(text) => append_text(target, id, text),
                Node::Element(_) => ElementRef::wrap(child)
                    .is_some_and(|el| copy_clean(el, target, id, depth + 1)),
                _ => false,
            };
            has_content |= kept;
        }
    }

    if has_content || ALWAYS_KEPT.contains(&name) {
        return true;
    }
    if let Some(mut node) = target.tree.get_mut(id) {
        node.detach();
    }
    false
}

/// Appends collapsed `text` under `parent`; whitespace-only text is skipped.
fn append_text(target: &mut Html, parent: NodeId, text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    let collapsed = collapse_runs(text);
    if let Some(mut node) = target.tree.get_mut(parent) {
        node.append(Node::Text(Text {
            text: StrTendril::from(collapsed.as_str()),
        }));
    }
    true
}

/// Text under `element`, skipping denylisted subtrees.
///
/// Used past the recursion limit, so it walks with an explicit stack.
fn visible_text(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    let mut stack: Vec<_> = element.children().rev().collect();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(t) => text.push_str(t),
            Node::Element(el) if REMOVED_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => stack.extend(node.children().rev()),
            _ => {}
        }
    }
    text
}

/// Replaces every whitespace run with a single space, keeping the edges.
///
/// Edges are kept so `Hello <b>world</b>` does not become `Hello<b>world</b>`.
fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_denylisted_subtrees_with_their_text() {
        let raw = r#"<html><head><style>.x { color: red }</style></head><body>
            <script>var secret = 1;</script>
            <p>Keep me</p>
            <form><label>Name</label><input name="n"><button>Send</button></form>
            <p>And me</p>
        </body></html>"#;
        let clean = sanitize_html(raw);
        assert!(clean.contains("<p>Keep me</p>"));
        assert!(clean.contains("<p>And me</p>"));
        assert!(!clean.contains("secret"));
        assert!(!clean.contains("color"));
        assert!(!clean.contains("Name"));
        assert!(!clean.contains("<form"));
        assert!(!clean.contains("<button"));
    }

    #[test]
    fn test_removes_page_chrome() {
        let raw = "<body><header>Logo</header><nav><a href='/'>Home</a></nav>\
                   <main>Body text</main><footer>Copyright</footer></body>";
        let clean = sanitize_html(raw);
        assert!(clean.contains("<main>Body text</main>"));
        assert!(!clean.contains("Logo"));
        assert!(!clean.contains("Home"));
        assert!(!clean.contains("Copyright"));
    }

    #[test]
    fn test_prunes_nested_empty_wrappers() {
        let raw = "<body><div><div><span>  </span></div></div><p>x</p></body>";
        let clean = sanitize_html(raw);
        assert!(!clean.contains("<div"));
        assert!(!clean.contains("<span"));
        assert!(clean.contains("<p>x</p>"));
    }

    #[test]
    fn test_wrapper_emptied_by_removal_is_pruned() {
        let raw = "<body><div class='ad'><script>track()</script></div><p>text</p></body>";
        let clean = sanitize_html(raw);
        assert!(!clean.contains("ad"));
        assert!(clean.contains("<p>text</p>"));
    }

    #[test]
    fn test_keeps_void_content_elements() {
        let raw = r#"<body><div><img src="/a.png" alt="A"></div><p>one<br>two</p></body>"#;
        let clean = sanitize_html(raw);
        assert!(clean.contains("<div><img "));
        assert!(clean.contains(r#"src="/a.png""#));
        assert!(clean.contains("<p>one<br>two</p>"));
    }

    #[test]
    fn test_keeps_document_skeleton_for_empty_input() {
        let clean = sanitize_html("");
        assert_eq!(clean, "<!DOCTYPE html><html><head></head><body></body></html>");
    }

    #[test]
    fn test_collapses_whitespace() {
        let raw = "<body>\n  <p>Hello   \n\t <b>big</b>   world</p>\n</body>";
        let clean = sanitize_html(raw);
        assert!(clean.contains("<body><p>Hello <b>big</b> world</p></body>"));
    }

    #[test]
    fn test_keeps_head_title_and_html_lang() {
        let raw = r#"<html lang="fr"><head><title>Titre</title><meta name="x" content="y"></head><body><p>a</p></body></html>"#;
        let clean = sanitize_html(raw);
        assert!(clean.contains(r#"<html lang="fr">"#));
        assert!(clean.contains("<title>Titre</title>"));
        assert!(!clean.contains("<meta"));
    }

    #[test]
    fn test_malformed_markup_does_not_fail() {
        let clean = sanitize_html("<div><p>unclosed <b>bold <i>both</div></p>");
        assert!(clean.contains("unclosed"));
        assert!(clean.contains("both"));
    }

    #[test]
    fn test_deep_nesting_keeps_text() {
        let depth = MAX_SANITIZE_DEPTH + 50;
        let raw = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let clean = sanitize_html(&raw);
        assert!(clean.contains("deep"));
    }

    #[test]
    fn test_deep_nesting_still_drops_denylisted_text() {
        let depth = MAX_SANITIZE_DEPTH + 5;
        let raw = format!(
            "<body>{}<p>visible</p><script>hidden_call()</script><style>.hidden{{}}</style>\
             <form>form text</form><div><noscript>no js</noscript>tail</div>{}</body>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let clean = sanitize_html(&raw);
        assert!(clean.contains("visible"));
        assert!(clean.contains("tail"));
        assert!(!clean.contains("hidden_call"));
        assert!(!clean.contains(".hidden"));
        assert!(!clean.contains("form text"));
        assert!(!clean.contains("no js"));
    }

    #[test]
    fn test_escapes_text_through_html5ever() {
        let clean = sanitize_html("<body><p>a &lt; b &amp; c</p></body>");
        assert!(clean.contains("<p>a &lt; b &amp; c</p>"));
    }
}
