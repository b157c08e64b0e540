use super::*;

#[test]
fn error_uses_description_verbatim() {
    let v = AHEM_COPY.error("fonts/ahem-copy.ttf");
    assert_eq!(v.rule, "AHEM COPY");
    assert_eq!(v.message, AHEM_COPY.description);
    assert_eq!(v.path, "fonts/ahem-copy.ttf");
    assert_eq!(v.line, None);
}

#[test]
fn error_with_fills_placeholders_in_order() {
    let v = WORKER_COLLISION.error_with("a/b.any.html", &[".any.html", ".any.js"]);
    assert_eq!(
        v.message,
        "path ends with .any.html which collides with generated tests from .any.js files"
    );
}

#[test]
fn missing_context_leaves_placeholder() {
    let v = FILE_TYPE.error_with("link", &["link"]);
    assert_eq!(v.message, "/link is an unsupported file type ({})");
}

#[test]
fn extra_context_is_ignored() {
    let v = IGNORED_PATH.error_with("x", &["x", "unused"]);
    assert!(v.message.starts_with("x matches an ignore filter"));
}

#[test]
fn non_suppressible_is_ignored_path() {
    assert_eq!(NON_SUPPRESSIBLE, "IGNORED PATH");
}
