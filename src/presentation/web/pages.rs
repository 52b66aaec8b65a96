// src/presentation/web/pages.rs
//! HTML rendering. Every piece of user-provided text passes through
//! [`escape_html`].

use crate::application::dto::{ArticleDto, AuthenticatedUser, PaginatedResult};
use crate::application::queries::articles::ArticleDetail;
use std::fmt::Write as _;

use super::session::Notice;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Shared chrome around every page.
pub struct Layout<'a> {
    pub title: &'a str,
    pub user: Option<&'a AuthenticatedUser>,
    pub notice: Option<Notice>,
}

impl Layout<'_> {
    pub fn render(&self, content: &str) -> String {
        let nav = match self.user {
            Some(user) => format!(
                r#"<span>Signed in as {}</span>
<a href="/articles/new">New article</a>
<form method="post" action="/logout" class="inline"><button type="submit">Log out</button></form>"#,
                escape_html(&user.username)
            ),
            None => r#"<a href="/login">Log in</a>"#.to_string(),
        };
        let notice = self
            .notice
            .map(|n| format!(r#"<p class="notice">{}</p>"#, n.message()))
            .unwrap_or_default();

        format!(
            r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | inkpost</title></head>
<body>
<header><a href="/">inkpost</a> {nav}</header>
{notice}
<main>
{content}
</main>
</body>
</html>
"#,
            title = escape_html(self.title),
        )
    }
}

pub fn article_list(page: &PaginatedResult<ArticleDto>, search: Option<&str>) -> String {
    let search_value = escape_html(search.unwrap_or_default());
    let mut html = format!(
        r#"<h1>Articles</h1>
<form method="get" action="/"><input type="search" name="q" value="{search_value}"><button type="submit">Search</button></form>
"#
    );

    if page.results.is_empty() {
        html.push_str("<p>No articles yet.</p>\n");
    } else {
        html.push_str("<ul class=\"articles\">\n");
        for article in &page.results {
            let _ = writeln!(
                html,
                r#"<li><a href="/articles/{slug}">{title}</a> by {owner} <time>{created}</time></li>"#,
                slug = escape_html(&article.slug),
                title = escape_html(&article.title),
                owner = escape_html(&article.owner),
                created = article.created.format("%Y-%m-%d %H:%M"),
            );
        }
        html.push_str("</ul>\n");
    }

    let query = match search {
        Some(q) => format!("&amp;q={}", escape_html(&url_component(q))),
        None => String::new(),
    };
    html.push_str("<nav class=\"pagination\">");
    if page.has_previous() {
        let _ = write!(html, r#"<a href="/?page={}{query}">Previous</a> "#, page.page - 1);
    }
    if page.total_pages > 0 {
        let _ = write!(html, "Page {} of {}", page.page, page.total_pages);
    }
    if page.has_next() {
        let _ = write!(html, r#" <a href="/?page={}{query}">Next</a>"#, page.page + 1);
    }
    html.push_str("</nav>\n");
    html
}

fn url_component(value: &str) -> String {
    serde_urlencoded::to_string([("", value)])
        .map(|encoded| encoded.trim_start_matches('=').to_string())
        .unwrap_or_default()
}

pub fn article_detail(detail: &ArticleDetail) -> String {
    let article = &detail.article;
    let slug = escape_html(&article.slug);
    let actions = if detail.can_edit {
        format!(
            r#"<p><a href="/articles/{slug}/edit">Edit</a> <a href="/articles/{slug}/delete">Delete</a></p>"#
        )
    } else {
        String::new()
    };

    format!(
        r#"<article>
<h1>{title}</h1>
<p class="meta">by {owner}, created <time>{created}</time>, updated <time>{updated}</time></p>
<div class="body">{body}</div>
</article>
{actions}"#,
        title = escape_html(&article.title),
        owner = escape_html(&article.owner),
        created = article.created.to_rfc3339(),
        updated = article.updated.to_rfc3339(),
        body = escape_html(&article.body).replace('\n', "<br>\n"),
    )
}

/// Values and error shown on a create or edit form.
#[derive(Debug, Default)]
pub struct ArticleFormView<'a> {
    pub heading: &'a str,
    pub action: &'a str,
    pub title: &'a str,
    pub body: &'a str,
    pub error: Option<&'a str>,
}

pub fn article_form(view: &ArticleFormView<'_>) -> String {
    let error = view
        .error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();
    format!(
        r#"<h1>{heading}</h1>
{error}
<form method="post" action="{action}">
<label>Title <input type="text" name="title" maxlength="200" value="{title}"></label>
<label>Body <textarea name="body">{body}</textarea></label>
<button type="submit">Save</button>
</form>"#,
        heading = escape_html(view.heading),
        action = escape_html(view.action),
        title = escape_html(view.title),
        body = escape_html(view.body),
    )
}

pub fn delete_confirmation(article: &ArticleDto) -> String {
    let slug = escape_html(&article.slug);
    format!(
        r#"<h1>Delete article</h1>
<p>Delete "{title}"? This cannot be undone.</p>
<form method="post" action="/articles/{slug}/delete">
<button type="submit">Delete</button> <a href="/articles/{slug}">Cancel</a>
</form>"#,
        title = escape_html(&article.title),
    )
}

pub fn login_form(next: &str, username: &str, error: Option<&str>) -> String {
    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape_html(e)))
        .unwrap_or_default();
    format!(
        r#"<h1>Log in</h1>
{error}
<form method="post" action="/login">
<input type="hidden" name="next" value="{next}">
<label>Username <input type="text" name="username" value="{username}"></label>
<label>Password <input type="password" name="password"></label>
<button type="submit">Log in</button>
</form>"#,
        next = escape_html(next),
        username = escape_html(username),
    )
}

pub fn error_message(heading: &str, message: &str) -> String {
    format!(
        "<h1>{}</h1>\n<p>{}</p>",
        escape_html(heading),
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn article(title: &str, body: &str) -> ArticleDto {
        let now = Utc::now();
        ArticleDto {
            title: title.into(),
            slug: "a-slug".into(),
            body: body.into(),
            owner: "<alice>".into(),
            owner_id: 1,
            created: now,
            updated: now,
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn detail_escapes_user_text_and_hides_actions_from_non_owners() {
        let detail = ArticleDetail {
            article: article("<b>Title</b>", "line one\n<i>two</i>"),
            can_edit: false,
        };
        let html = article_detail(&detail);
        assert!(html.contains("&lt;b&gt;Title&lt;/b&gt;"));
        assert!(html.contains("&lt;alice&gt;"));
        assert!(!html.contains("<i>"));
        assert!(!html.contains("/edit"));

        let owner_view = article_detail(&ArticleDetail {
            can_edit: true,
            ..detail
        });
        assert!(owner_view.contains("/articles/a-slug/edit"));
        assert!(owner_view.contains("/articles/a-slug/delete"));
    }

    #[test]
    fn list_links_carry_the_search_term() {
        let page = PaginatedResult::new(vec![article("One", "b")], 25, 2, 10);
        let html = article_list(&page, Some("rust & go"));
        assert!(html.contains("/?page=1&amp;q=rust+%26+go"));
        assert!(html.contains("/?page=3&amp;q=rust+%26+go"));
        assert!(html.contains("Page 2 of 3"));
    }
}
