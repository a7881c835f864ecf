//! 用 html5ever 分词检查改写结果的结构

use std::cell::RefCell;
use std::sync::Arc;

use html5ever::tokenizer::{
    BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use markup5ever::interface::Attribute;
use tendril::StrTendril;

use rsamp::{
    CatalogTranslator, ConfigManager, EmbedHandler, OembedContext, OembedFilterRegistry,
    WordPressEmbedHandler,
};
use rsamp::hooks::EMBED_OEMBED_HTML;

/// 记录的标签：(名称, 是否结束标签, 属性)
type RecordedTag = (String, bool, Vec<(String, String)>);

#[derive(Default)]
struct TagRecorder {
    tags: RefCell<Vec<RecordedTag>>,
}

impl TokenSink for TagRecorder {
    type Handle = ();

    fn process_token(&self, token: Token, _line: u64) -> TokenSinkResult<()> {
        if let Token::TagToken(Tag { kind, name, attrs, .. }) = token {
            self.tags.borrow_mut().push((
                name.to_string(),
                kind == TagKind::EndTag,
                attrs.iter().map(attr_pair).collect(),
            ));
        }
        TokenSinkResult::Continue
    }
}

fn attr_pair(attr: &Attribute) -> (String, String) {
    (attr.name.local.to_string(), attr.value.to_string())
}

fn tokenize(html: &str) -> Vec<RecordedTag> {
    let tokenizer = Tokenizer::new(TagRecorder::default(), TokenizerOpts::default());
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from(html));
    let _ = tokenizer.feed(&queue);
    tokenizer.end();
    tokenizer.sink.tags.into_inner()
}

fn attr<'a>(tag: &'a RecordedTag, name: &str) -> Option<&'a str> {
    tag.2.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
}

const POST_URL: &str = "https://make.wordpress.org/core/2015/10/28/new-embeds-feature-in-wordpress-4-4/";

const POST_EMBED: &str = r#"<blockquote class="wp-embedded-content" data-secret="xUuZHketRt">
    <a href="https://make.wordpress.org/core/2015/10/28/new-embeds-feature-in-wordpress-4-4/">New Embeds Feature in WordPress 4.4</a>
</blockquote>
<iframe
    title="&#8220;New Embeds Feature in WordPress 4.4&#8221; &#8212; Make WordPress Core"
    class="wp-embedded-content"
    sandbox="allow-scripts"
    security="restricted"
    style="position: absolute; clip: rect(1px, 1px, 1px, 1px);"
    src="https://make.wordpress.org/core/2015/10/28/new-embeds-feature-in-wordpress-4-4/embed/#?secret=xUuZHketRt"
    data-secret="xUuZHketRt"
    width="600"
    height="338"
    frameborder="0"
    marginwidth="0"
    marginheight="0"
    scrolling="no">
</iframe>"#;

#[test]
fn test_rewritten_structure() {
    let handler = WordPressEmbedHandler::default();
    let out = handler.filter_embed_oembed_html(POST_EMBED, POST_URL);
    let tags = tokenize(&out);

    let names: Vec<(&str, bool)> = tags.iter().map(|t| (t.0.as_str(), t.1)).collect();
    assert_eq!(
        names,
        vec![
            ("amp-wordpress-embed", false),
            ("blockquote", false),
            ("a", false),
            ("a", true),
            ("blockquote", true),
            ("button", false),
            ("button", true),
            ("amp-wordpress-embed", true),
        ]
    );

    let root = &tags[0];
    assert_eq!(attr(root, "height"), Some("200"));
    // 分词器会解码实体
    assert_eq!(
        attr(root, "title"),
        Some("\u{201c}New Embeds Feature in WordPress 4.4\u{201d} \u{2014} Make WordPress Core")
    );
    assert_eq!(attr(root, "data-url"), Some(POST_URL));

    let placeholder = &tags[1];
    assert_eq!(attr(placeholder, "placeholder"), Some(""));
    assert_eq!(attr(placeholder, "data-secret"), Some("xUuZHketRt"));

    let button = &tags[5];
    assert_eq!(attr(button, "overflow"), Some(""));
    assert_eq!(attr(button, "type"), Some("button"));

    // 原 iframe 被丢弃
    assert!(tags.iter().all(|t| t.0 != "iframe"));
}

#[test]
fn test_title_attribute_present_without_iframe_title() {
    let without_title = POST_EMBED.replace(
        "title=\"&#8220;New Embeds Feature in WordPress 4.4&#8221; &#8212; Make WordPress Core\"",
        "",
    );
    let handler = WordPressEmbedHandler::default();
    let out = handler.filter_embed_oembed_html(&without_title, POST_URL);
    let tags = tokenize(&out);
    assert_eq!(attr(&tags[0], "title"), Some(""));
}

#[test]
fn test_custom_height_and_translation() {
    let config = ConfigManager::custom().embed_height(480).build();
    let translator = CatalogTranslator::from_json(r#"{"amp": {"Expand": "Développer"}}"#).unwrap();
    let handler = WordPressEmbedHandler::new(&config).with_translator(Arc::new(translator));

    let out = handler.filter_embed_oembed_html(POST_EMBED, POST_URL);
    assert!(out.contains(r#"<button overflow type="button">Développer</button>"#));
    assert_eq!(attr(&tokenize(&out)[0], "height"), Some("480"));
}

#[test]
fn test_registry_chain_keeps_other_filters() {
    let registry = OembedFilterRegistry::new();
    registry.add_filter(
        EMBED_OEMBED_HTML,
        "wrap_figure",
        200,
        2,
        Arc::new(|html: String, _: &OembedContext| format!("<figure>{html}</figure>")),
    );

    let handler = WordPressEmbedHandler::default();
    handler.register_embed(&registry);
    let out = registry.apply_filters(EMBED_OEMBED_HTML, POST_EMBED.to_string(), &OembedContext::new(POST_URL));
    assert!(out.starts_with("<figure><amp-wordpress-embed "));
    assert!(out.ends_with("</amp-wordpress-embed></figure>"));

    handler.unregister_embed(&registry);
    let out = registry.apply_filters(EMBED_OEMBED_HTML, POST_EMBED.to_string(), &OembedContext::new(POST_URL));
    assert_eq!(out, format!("<figure>{POST_EMBED}</figure>"));
}
