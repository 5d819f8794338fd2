use hermes_render::{
    generate_html, generate_plain_text, Action, Body, Button, CustomTheme, Email, EngineConfig,
    Entry, Hermes, Markdown, RenderError, Table, TemplateKind, TextDirection,
};

fn jon_snow() -> Email {
    Email::new(Body {
        name: Some("Jon Snow".into()),
        intros: vec!["Welcome!".into()],
        actions: vec![Action {
            instructions: "Copy your invite code:".into(),
            invite_code: Some("123456".into()),
            ..Action::default()
        }],
        outros: vec!["Need help?".into()],
        ..Body::default()
    })
}

fn maintenance() -> Email {
    Email::new(Body {
        name: Some("Jon Snow".into()),
        intros: vec!["This intro is hidden.".into()],
        outros: vec!["This outro is hidden.".into()],
        actions: vec![Action {
            instructions: "Copy your invite code:".into(),
            invite_code: Some("987654".into()),
            ..Action::default()
        }],
        free_markdown: Some(Markdown::new(
            "> _Hermes_ service will shutdown the **1st August 2017** for maintenance operations.\n\n\
             Services will be unavailable based on the following schedule:\n\n\
             | Services | Downtime |\n\
             | :------: | :------: |\n\
             | Service A | 2AM to 3AM |\n\
             | Service B | 4AM to 5AM |\n\n\
             Feel free to contact us for any question regarding this matter at \
             [support@hermes-example.com](mailto:support@hermes-example.com)",
        )),
        ..Body::default()
    })
}

fn theme(html: &str, plain: &str) -> EngineConfig {
    EngineConfig::default().with_theme(CustomTheme::new("test", html, plain))
}

fn assert_no_markup(text: &str) {
    assert!(
        !text.contains('<') && !text.contains('>'),
        "markup left in plain text:\n{text}"
    );
}

#[test]
fn test_invite_code_scenario() {
    let config = EngineConfig::default();
    let email = jon_snow();

    let html = generate_html(&config, &email).unwrap();
    assert!(html.contains("123456"));
    assert!(html.contains("Jon Snow"));

    let text = generate_plain_text(&config, &email).unwrap();
    assert!(text.contains("123456"), "{text}");
    assert!(text.contains("Jon Snow"), "{text}");
    assert_no_markup(&text);
}

#[test]
fn test_plain_text_reads_in_order() {
    let text = generate_plain_text(&EngineConfig::default(), &jon_snow()).unwrap();
    let order = [
        "Hi Jon Snow,",
        "Welcome!",
        "Copy your invite code:",
        "123456",
        "Need help?",
        "Yours truly,",
        "Hermes",
        "All rights reserved.",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| text.find(needle).unwrap_or_else(|| panic!("{needle:?} missing:\n{text}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
}

#[test]
fn test_free_markdown_replaces_structured_content() {
    let config = EngineConfig::default();
    let email = maintenance();

    let html = generate_html(&config, &email).unwrap();
    assert!(html.contains("1st August 2017"));
    assert!(html.contains("<blockquote"));
    assert!(html.contains("Service B"));
    assert!(html.contains("mailto:support@hermes-example.com"));
    assert!(!html.contains("This intro is hidden."));
    assert!(!html.contains("This outro is hidden."));
    assert!(!html.contains("987654"));
    // header and signature stay
    assert!(html.contains("Hi Jon Snow,"));
    assert!(html.contains("Yours truly,"));

    let text = generate_plain_text(&config, &email).unwrap();
    assert!(text.contains("1st August 2017"), "{text}");
    assert!(text.contains("Service A"), "{text}");
    assert!(!text.contains("This intro is hidden."));
    assert!(!text.contains("987654"));
}

#[test]
fn test_markdown_is_not_escaped_twice() {
    let email = maintenance();
    let html = generate_html(&EngineConfig::default(), &email).unwrap();
    assert!(!html.contains("&lt;blockquote"));
    assert!(!html.contains("&amp;lt;"));
}

#[test]
fn test_caller_strings_are_escaped() {
    let email = Email::new(Body {
        name: Some("<b>Jon</b>".into()),
        ..Body::default()
    });
    let html = generate_html(&EngineConfig::default(), &email).unwrap();
    assert!(html.contains("&lt;b&gt;Jon"));
    assert!(!html.contains("<b>Jon</b>"));
}

#[test]
fn test_minimal_body_renders_with_defaults() {
    let config = EngineConfig::default();
    let email = Email::default();

    let html = generate_html(&config, &email).unwrap();
    assert!(html.contains("Yours truly,"));
    assert!(html.contains("Hermes"));
    assert!(html.contains("All rights reserved."));
    assert!(html.contains(r#"dir="ltr""#));

    let text = generate_plain_text(&config, &email).unwrap();
    assert!(text.contains("Hi ,"), "{text}");
    assert!(text.contains("Yours truly,"), "{text}");
    assert_no_markup(&text);
}

#[test]
fn test_title_replaces_greeting() {
    let email = Email::new(Body {
        name: Some("Jon Snow".into()),
        title: Some("Your receipt".into()),
        ..Body::default()
    });
    let text = generate_plain_text(&EngineConfig::default(), &email).unwrap();
    assert!(text.contains("Your receipt"));
    assert!(!text.contains("Hi Jon Snow"));
}

#[test]
fn test_default_theme_styles_are_inlined() {
    let html = generate_html(&EngineConfig::default(), &jon_snow()).unwrap();
    assert!(html.contains(r#"class="invite-code""#));
    assert!(html.contains("style=\""));
    // media queries cannot be inlined and stay in a stylesheet
    assert!(html.contains("@media"));
}

#[test]
fn test_disabled_inlining_is_byte_identical_to_template_output() {
    let mut config = EngineConfig::default();
    let email = jon_snow();
    let inlined = generate_html(&config, &email).unwrap();

    config.disable_css_inlining = true;
    let raw = generate_html(&config, &email).unwrap();
    assert_ne!(raw, inlined);
    assert!(raw.contains(".invite-code {"));

    let hermes = Hermes::new(config);
    assert_eq!(hermes.generate_html(&email).unwrap(), raw);
}

#[test]
fn test_undefined_helper_is_a_syntax_error_at_render_time() {
    // building the theme never looks at the template
    let config = theme("<p>{{ shout(email.body.name) }}</p>", "<p>ok</p>");

    let err = generate_html(&config, &jon_snow()).unwrap_err();
    assert!(
        matches!(
            err,
            RenderError::TemplateSyntax {
                template: TemplateKind::Html,
                ..
            }
        ),
        "{err:?}"
    );

    // the other template of the same theme still works
    assert_eq!(generate_plain_text(&config, &jon_snow()).unwrap(), "ok");
}

#[test]
fn test_unparsable_template_is_a_syntax_error() {
    let config = theme("<p>ok</p>", "{% for x in %}");
    let err = generate_plain_text(&config, &jon_snow()).unwrap_err();
    assert!(
        matches!(
            err,
            RenderError::TemplateSyntax {
                template: TemplateKind::PlainText,
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn test_unknown_field_is_an_execution_error() {
    let config = theme("<p>{{ email.body.nickname }}</p>", "");
    let err = generate_html(&config, &jon_snow()).unwrap_err();
    match err {
        RenderError::TemplateExecution { theme, template, .. } => {
            assert_eq!(theme, "test");
            assert_eq!(template, TemplateKind::Html);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unset_optional_field_renders_empty() {
    let config = theme("<p>[{{ email.body.title }}][{{ engine_config.brand.logo }}]</p>", "");
    let html = generate_html(&config, &Email::default()).unwrap();
    assert!(html.contains("<p>[][]</p>"), "{html}");
}

#[test]
fn test_safe_rejects_non_strings() {
    let config = theme("<div>{{ safe(email.body.intros) }}</div>", "");
    let err = generate_html(&config, &jon_snow()).unwrap_err();
    assert!(matches!(err, RenderError::TemplateExecution { .. }), "{err:?}");
}

#[test]
fn test_malformed_style_fails_inlining_unless_disabled() {
    let source = "<html><head><style>p[ { color: red }</style></head><body><p>x</p></body></html>";
    let mut config = theme(source, "");

    let err = generate_html(&config, &Email::default()).unwrap_err();
    assert!(matches!(err, RenderError::CssInlining(_)), "{err:?}");
    assert!(!err.is_template_error());

    config.disable_css_inlining = true;
    assert_eq!(generate_html(&config, &Email::default()).unwrap(), source);
}

#[test]
fn test_table_rows_keep_their_order() {
    let rows = [("Golang", "3"), ("Elixir", "1"), ("Rust", "2"), ("Zig", "4")];
    let email = Email::new(Body {
        table: Table {
            data: rows
                .iter()
                .map(|(item, qty)| vec![Entry::new("Item", *item), Entry::new("Quantity", *qty)])
                .collect(),
            ..Table::default()
        },
        ..Body::default()
    });
    let config = EngineConfig::default();

    let html = generate_html(&config, &email).unwrap();
    let positions: Vec<usize> = rows
        .iter()
        .map(|(item, _)| html.find(item).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(html.contains("Quantity"));

    let text = generate_plain_text(&config, &email).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    let row_lines: Vec<usize> = rows
        .iter()
        .map(|(item, qty)| {
            lines
                .iter()
                .position(|line| line.contains(item) && line.contains(qty))
                .unwrap_or_else(|| panic!("row {item} missing:\n{text}"))
        })
        .collect();
    assert!(row_lines.windows(2).all(|w| w[0] < w[1]), "{text}");
    assert_no_markup(&text);
}

#[test]
fn test_right_to_left_direction() {
    let config = EngineConfig {
        text_direction: Some(TextDirection::Rtl),
        ..EngineConfig::default()
    };
    let html = generate_html(&config, &jon_snow()).unwrap();
    assert!(html.contains(r#"dir="rtl""#));
}

#[test]
fn test_button_and_trouble_text() {
    let email = Email::new(Body {
        name: Some("Jon Snow".into()),
        actions: vec![Action {
            instructions: "To get started with Hermes, please click here:".into(),
            button: Some(
                Button::new("Confirm your account", "https://hermes-example.com/confirm?token=d9729feb74992cc3482b350163a1a010")
                    .color("#22BC66"),
            ),
            ..Action::default()
        }],
        ..Body::default()
    });
    let config = EngineConfig::default();

    let html = generate_html(&config, &email).unwrap();
    assert!(html.contains("Confirm your account"));
    assert!(html.contains("#22BC66"));
    assert!(html.contains("having trouble with the button 'Confirm your account'"));
    assert!(html.contains("https://hermes-example.com/confirm?token=d9729feb74992cc3482b350163a1a010"));

    let text = generate_plain_text(&config, &email).unwrap();
    assert!(text.contains("https://hermes-example.com/confirm?token=d9729feb74992cc3482b350163a1a010"));
    assert_no_markup(&text);
}

#[test]
fn test_dictionary_entries_keep_their_order() {
    let email = Email::new(Body {
        dictionary: vec![
            Entry::new("Firstname", "Jon"),
            Entry::new("Lastname", "Snow"),
            Entry::new("Birthday", "01/01/283"),
        ],
        ..Body::default()
    });
    let text = generate_plain_text(&EngineConfig::default(), &email).unwrap();
    let first = text.find("Firstname: Jon").unwrap();
    let last = text.find("Lastname: Snow").unwrap();
    let birthday = text.find("Birthday: 01/01/283").unwrap();
    assert!(first < last && last < birthday, "{text}");
}

#[test]
fn test_concurrent_rendering() {
    let hermes = Hermes::default();
    let expected = hermes.generate(&jon_snow()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| hermes.generate(&jon_snow()).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_blank_free_markdown_still_hides_structured_content() {
    let email = Email::new(Body {
        intros: vec!["Structured intro".into()],
        outros: vec!["Structured outro".into()],
        free_markdown: Some(Markdown::new("   \n")),
        ..Body::default()
    });
    let config = EngineConfig::default();

    let html = generate_html(&config, &email).unwrap();
    assert!(!html.contains("Structured intro"));
    assert!(!html.contains("Structured outro"));

    let text = generate_plain_text(&config, &email).unwrap();
    assert!(!text.contains("Structured intro"), "{text}");
    assert!(text.contains("Yours truly,"), "{text}");
}

#[test]
fn test_raw_html_in_free_markdown_is_shown_as_text() {
    let email = Email::new(Body {
        free_markdown: Some(Markdown::new("hi <script>alert(1)</script>")),
        ..Body::default()
    });
    let html = generate_html(&EngineConfig::default(), &email).unwrap();
    assert!(!html.contains("<script>alert(1)"), "{html}");
    assert!(html.contains("&lt;script&gt;alert(1)"), "{html}");
}
