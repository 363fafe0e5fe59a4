#![cfg(test)]
#![allow(
    clippy::missing_panics_doc,
    reason = "Assertions in tests are expected"
)]

use css_color_alpha::{ColorAlpha, Options, process};

fn init_logging() {
    let _logger_ready = env_logger::builder().is_test(true).try_init().is_ok();
}

fn check(input: &str, expected: &str) {
    init_logging();
    assert_eq!(process(input, &Options::default()), expected, "input: {input}");
}

#[test]
fn converts_black_to_rgba() {
    check("a{ color: black(0) }", "a{ color: rgba(0, 0, 0, 0) }");
    check("a{ color: black(.3) }", "a{ color: rgba(0, 0, 0, 0.3) }");
}

#[test]
fn converts_white_to_rgba() {
    check("a{ color: white(.2) }", "a{ color: rgba(255, 255, 255, 0.2) }");
    check("a{ color: white(0) }", "a{ color: rgba(255, 255, 255, 0) }");
}

#[test]
fn opaque_black_and_white_become_short_hex() {
    check("a{ color: black(1) }", "a{ color: #000 }");
    check("a{ color: white(1) }", "a{ color: #FFF }");
}

#[test]
fn converts_white_without_arguments() {
    check("a{ color: white() }", "a{ color: rgba(255, 255, 255, 0) }");
}

#[test]
fn converts_short_hex_with_alpha() {
    check("a{ color: #0fc.3 }", "a{ color: rgba(0, 255, 204, 0.3) }");
}

#[test]
fn converts_long_hex_with_alpha() {
    check("a{ color: #00ffcc.45 }", "a{ color: rgba(0, 255, 204, 0.45) }");
}

#[test]
fn converts_inside_long_values() {
    check(
        "div{ border: solid 1px #0fc.45 }",
        "div{ border: solid 1px rgba(0, 255, 204, 0.45) }",
    );
    check(
        "div{ border: solid 1px black(0.9) }",
        "div{ border: solid 1px rgba(0, 0, 0, 0.9) }",
    );
}

#[test]
fn converts_series() {
    check(
        "div{ border-color: #0fc.1 #000.2 #fff.3 #ccc.4 }",
        "div{ border-color: rgba(0, 255, 204, 0.1) rgba(0, 0, 0, 0.2) rgba(255, 255, 255, 0.3) rgba(204, 204, 204, 0.4) }",
    );
}

#[test]
fn keeps_standard_colors_in_mixed_series() {
    check(
        "div{ border-color: #0fc #000.2 white(.3) black }",
        "div{ border-color: #0fc rgba(0, 0, 0, 0.2) rgba(255, 255, 255, 0.3) black }",
    );
}

#[test]
fn converts_inside_gradients() {
    check(
        "div{ background: #004400 radial-gradient(#fff.05, #fff.0) }",
        "div{ background: #004400 radial-gradient(rgba(255, 255, 255, 0.05), rgba(255, 255, 255, 0)) }",
    );
    check(
        "div{ background: #004400 radial-gradient(white(0.05), white(0)) }",
        "div{ background: #004400 radial-gradient(rgba(255, 255, 255, 0.05), rgba(255, 255, 255, 0)) }",
    );
}

#[test]
fn converts_comma_separated_values() {
    check(
        ".bg { text-shadow: 1px 1px 1px #0fc.1, 3px 3px 5px #fff.05;}",
        ".bg { text-shadow: 1px 1px 1px rgba(0, 255, 204, 0.1), 3px 3px 5px rgba(255, 255, 255, 0.05);}",
    );
}

#[test]
fn converts_rgba_with_hex_argument() {
    check("a{ color: rgba(#000, .6) }", "a{ color: rgba(0, 0, 0, 0.6) }");
    check(
        "b{ border-color: rgba(#000, .6) rgba(#fff, 0.1) #333 #666 }",
        "b{ border-color: rgba(0, 0, 0, 0.6) rgba(255, 255, 255, 0.1) #333 #666 }",
    );
    check(
        ".bg { text-shadow: 1px 1px 1px rgba(#0fc, .1), 3px 3px 5px rgba(#fff, .05);}",
        ".bg { text-shadow: 1px 1px 1px rgba(0, 255, 204, 0.1), 3px 3px 5px rgba(255, 255, 255, 0.05);}",
    );
}

#[test]
fn converts_rgba_with_hex_argument_in_top_level_gradient() {
    check(
        "background-image: linear-gradient(to bottom, rgba(#fff, .6) 0%, rgba(#fff, 0), 100%);",
        "background-image: linear-gradient(to bottom, rgba(255, 255, 255, 0.6) 0%, rgba(255, 255, 255, 0), 100%);",
    );
}

#[test]
fn converts_rgba_with_rgb_argument() {
    check(
        "a { color: rgba(rgb(204, 0, 255), 0.4); }",
        "a { color: rgba(204, 0, 255, 0.4); }",
    );
}

#[test]
fn keeps_important_and_surrounding_text() {
    check(
        "/* theme */\na:hover{color:white(.5)!important;border:1px solid #000}",
        "/* theme */\na:hover{color:rgba(255, 255, 255, 0.5)!important;border:1px solid #000}",
    );
}

#[test]
fn converts_inside_at_rules_and_nested_rules() {
    check(
        "@media (min-width: 600px) { .card { box-shadow: 0 1px 2px #000.25; & .title { color: black(.8) } } }",
        "@media (min-width: 600px) { .card { box-shadow: 0 1px 2px rgba(0, 0, 0, 0.25); & .title { color: rgba(0, 0, 0, 0.8) } } }",
    );
}

#[test]
fn leaves_selectors_and_at_rule_preludes_alone() {
    let css = "#fff.5 { color: red } @supports (color: black(.5)) { p { color: blue } }";
    check(css, css);
}

#[test]
fn leaves_malformed_fractions_alone() {
    for css in [
        "a{ color: #0fc.3.4 }",
        "a{ color: rgba(#fff.5, .5) }",
        "a{ color: rgb(#fff.5, 0, 0) }",
    ] {
        check(css, css);
    }
    check(
        "a{ color: #0fc.3, #0fc.3.4 }",
        "a{ color: rgba(0, 255, 204, 0.3), #0fc.3.4 }",
    );
}

#[test]
fn deeply_nested_input_is_kept_verbatim() {
    let deep_rules = format!("{}color: #fff.5", "a{".repeat(100_000));
    check(&deep_rules, &deep_rules);

    let deep_value = format!("a{{ background: {}#fff.5 }}", "(".repeat(100_000));
    check(&deep_value, &deep_value);

    check(
        &format!("{}color: #fff.5{}", "a{".repeat(16), "}".repeat(16)),
        &format!(
            "{}color: rgba(255, 255, 255, 0.5){}",
            "a{".repeat(16),
            "}".repeat(16)
        ),
    );
}

#[test]
fn options_loaded_from_json_drive_the_plugin() {
    init_logging();
    let loaded = Options::from_json(r#"{ "preserve": false }"#).ok();
    assert_eq!(loaded, Some(Options::default()));

    let plugin = loaded.clone().map(ColorAlpha::new);
    assert_eq!(plugin.as_ref().map(ColorAlpha::options), loaded.as_ref());

    let css = "a{ color: white(.3); border-color: #000.2 }";
    assert_eq!(
        loaded.map(|options| process(css, &options)).as_deref(),
        Some("a{ color: rgba(255, 255, 255, 0.3); border-color: rgba(0, 0, 0, 0.2) }")
    );
}
