// tests/e2e_web.rs
use axum::http::StatusCode;

mod support;
use support::{
    ALICE_TOKEN, BOB_TOKEN, PASSWORD, form_request, location, page_request, send, session,
    set_cookies, text_body,
};

async fn create_as_alice(app: &axum::Router, form: &str) -> String {
    let resp = send(app, form_request("/articles/new", Some(&session(ALICE_TOKEN)), form)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    location(&resp).to_string()
}

#[tokio::test]
async fn anonymous_visitors_are_sent_to_login() {
    let app = support::make_test_router().await;

    let resp = send(&app, page_request("/articles/new", None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login?next=%2Farticles%2Fnew");

    let resp = send(&app, form_request("/articles/new", None, "title=T&body=B")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(location(&resp).starts_with("/login?next="));
}

#[tokio::test]
async fn create_redirects_to_detail_with_a_notice() {
    let app = support::make_test_router().await;
    let resp = send(
        &app,
        form_request(
            "/articles/new",
            Some(&session(ALICE_TOKEN)),
            "title=My+First&body=Hello+web",
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/articles/my-first");
    let cookies = set_cookies(resp.headers());
    assert!(cookies.iter().any(|c| c.starts_with("inkpost_notice=created")));

    let cookie = format!("{}; inkpost_notice=created", session(ALICE_TOKEN));
    let resp = send(&app, page_request("/articles/my-first", Some(&cookie))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookies = set_cookies(resp.headers());
    assert!(cookies.iter().any(|c| c.starts_with("inkpost_notice=;")));
    let html = text_body(resp).await;
    assert!(html.contains("Article created."));
    assert!(html.contains("My First"));
    assert!(html.contains("Hello web"));
    assert!(html.contains("/articles/my-first/edit"));
}

#[tokio::test]
async fn invalid_form_is_redisplayed_with_errors() {
    let app = support::make_test_router().await;
    let resp = send(
        &app,
        form_request(
            "/articles/new",
            Some(&session(ALICE_TOKEN)),
            "title=&body=kept+text",
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = text_body(resp).await;
    assert!(html.contains("kept text"));
    assert!(html.contains("<form"));
}

#[tokio::test]
async fn non_owners_see_no_edit_links_and_are_refused() {
    let app = support::make_test_router().await;
    create_as_alice(&app, "title=My+First&body=Hello").await;

    let resp = send(&app, page_request("/articles/my-first", Some(&session(BOB_TOKEN)))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = text_body(resp).await;
    assert!(!html.contains("/articles/my-first/edit"));

    let resp = send(
        &app,
        page_request("/articles/my-first/edit", Some(&session(BOB_TOKEN))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        &app,
        form_request(
            "/articles/my-first/edit",
            Some(&session(BOB_TOKEN)),
            "title=Hijacked&body=x",
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        &app,
        form_request("/articles/my-first/delete", Some(&session(BOB_TOKEN)), ""),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(&app, page_request("/articles/my-first", None)).await;
    let html = text_body(resp).await;
    assert!(html.contains("My First"));
    assert!(!html.contains("Hijacked"));
}

#[tokio::test]
async fn owner_edits_and_deletes_through_forms() {
    let app = support::make_test_router().await;
    create_as_alice(&app, "title=My+First&body=Hello").await;

    let resp = send(
        &app,
        page_request("/articles/my-first/edit", Some(&session(ALICE_TOKEN))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(text_body(resp).await.contains("My First"));

    let resp = send(
        &app,
        form_request(
            "/articles/my-first/edit",
            Some(&session(ALICE_TOKEN)),
            "title=Renamed&body=Changed",
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/articles/my-first");
    assert!(
        set_cookies(resp.headers())
            .iter()
            .any(|c| c.starts_with("inkpost_notice=updated"))
    );

    let resp = send(&app, page_request("/articles/my-first", None)).await;
    let html = text_body(resp).await;
    assert!(html.contains("Renamed"));
    assert!(html.contains("Changed"));

    let resp = send(
        &app,
        page_request("/articles/my-first/delete", Some(&session(ALICE_TOKEN))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        &app,
        form_request("/articles/my-first/delete", Some(&session(ALICE_TOKEN)), ""),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let resp = send(&app, page_request("/articles/my-first", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_sets_session_cookie_and_honours_local_next() {
    let app = support::make_test_router().await;

    let form = format!(
        "username=alice&password={}&next=%2Farticles%2Fnew",
        PASSWORD.replace(' ', "+")
    );
    let resp = send(&app, form_request("/login", None, &form)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/articles/new");
    let cookie = set_cookies(resp.headers())
        .into_iter()
        .find(|c| c.starts_with("inkpost_session="))
        .expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=3600"));

    let form = format!(
        "username=alice&password={}&next=https%3A%2F%2Fevil.example",
        PASSWORD.replace(' ', "+")
    );
    let resp = send(&app, form_request("/login", None, &form)).await;
    assert_eq!(location(&resp), "/");
}

#[tokio::test]
async fn failed_login_redisplays_the_form() {
    let app = support::make_test_router().await;

    let resp = send(&app, form_request("/login", None, "username=alice&password=nope+nope")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(set_cookies(resp.headers()).is_empty());
    let html = text_body(resp).await;
    assert!(html.contains("Please enter a correct username and password."));
    assert!(html.contains("value=\"alice\""));

    let form = format!("username=carol&password={}", PASSWORD.replace(' ', "+"));
    let resp = send(&app, form_request("/login", None, &form)).await;
    assert!(text_body(resp).await.contains("This account is inactive."));
}

#[tokio::test]
async fn logout_expires_the_session_cookie() {
    let app = support::make_test_router().await;
    let resp = send(&app, form_request("/logout", Some(&session(ALICE_TOKEN)), "")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert!(
        set_cookies(resp.headers())
            .iter()
            .any(|c| c.starts_with("inkpost_session=;") && c.contains("Max-Age=0"))
    );
}

#[tokio::test]
async fn forged_session_cookie_is_treated_as_anonymous() {
    let app = support::make_test_router().await;
    let resp = send(&app, page_request("/articles/new", Some("inkpost_session=forged"))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let resp = send(&app, page_request("/", Some("inkpost_session=forged"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn user_content_is_escaped() {
    let app = support::make_test_router().await;
    let to = create_as_alice(
        &app,
        "title=%3Cscript%3Ealert(1)%3C%2Fscript%3E&body=%3Cb%3Ebold%3C%2Fb%3E",
    )
    .await;

    let resp = send(&app, page_request(&to, None)).await;
    let html = text_body(resp).await;
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn index_lists_and_searches_articles() {
    let app = support::make_test_router().await;
    create_as_alice(&app, "title=Rust+tips&body=a").await;
    create_as_alice(&app, "title=Go+notes&body=b").await;

    let resp = send(&app, page_request("/", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = text_body(resp).await;
    assert!(html.contains("Rust tips"));
    assert!(html.contains("Go notes"));
    assert!(html.find("Go notes") < html.find("Rust tips"));

    let resp = send(&app, page_request("/?q=rust", None)).await;
    let html = text_body(resp).await;
    assert!(html.contains("Rust tips"));
    assert!(!html.contains("Go notes"));
}

#[tokio::test]
async fn unknown_article_page_is_not_found() {
    let app = support::make_test_router().await;
    let resp = send(&app, page_request("/articles/missing", None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(text_body(resp).await.contains("<html"));
}
