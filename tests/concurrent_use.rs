//! 跨线程共享处理器与扫描上下文

use std::sync::Arc;

use rsamp::{HookLimitResolver, HookRegistry, UrlScanningContext, WordPressEmbedHandler};
use rsamp::hooks::URL_VALIDATION_LIMIT_PER_TYPE;

fn embed_for(n: usize) -> String {
    format!(
        r#"<blockquote class="wp-embedded-content"><a href="https://example.com/{n}/">Post {n}</a></blockquote><iframe title="Post {n}" src="https://example.com/{n}/embed/"></iframe>"#
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_rewrites() {
    let handler = Arc::new(WordPressEmbedHandler::default());

    let tasks: Vec<_> = (0..32)
        .map(|n| {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                let url = format!("https://example.com/{n}/");
                handler
                    .filter_embed_oembed_html(&embed_for(n), &url)
                    .into_owned()
            })
        })
        .collect();

    for (n, task) in tasks.into_iter().enumerate() {
        let out = task.await.unwrap();
        assert!(out.contains(&format!(r#"title="Post {n}""#)));
        assert!(out.contains(&format!(r#"data-url="https://example.com/{n}/""#)));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_limit_reads() {
    let registry: Arc<HookRegistry<i64>> = Arc::new(HookRegistry::new());
    registry.add_filter(
        URL_VALIDATION_LIMIT_PER_TYPE,
        "double",
        10,
        1,
        Arc::new(|limit: i64, _: &()| limit * 2),
    );

    let context = Arc::new(
        UrlScanningContext::new(3, vec!["is_home".to_string()], false)
            .with_limit_resolver(Arc::new(HookLimitResolver::new(Arc::clone(&registry)))),
    );

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let context = Arc::clone(&context);
            tokio::spawn(async move { context.get_limit_per_type() })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), 6);
    }
    assert_eq!(context.get_include_conditionals(), ["is_home"]);
}
