//! AppleScript source builders
//!
//! Every command the engine sends to the control plane is composed here.
//! Scripts that return nested data flatten it with the delimiters from
//! [`worksnap_domain::constants`], which [`crate::codec`] splits back apart.

use worksnap_domain::constants::{ERROR_TAG, INNER_DELIMITER, LAYOUTS_MENU, OK_TAG, OUTER_DELIMITER};
use worksnap_domain::WindowRect;

/// Escape a value for use inside an AppleScript string literal.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Names of all visible running application processes.
pub fn visible_processes() -> String {
    r#"
    tell application "System Events"
        set appList to name of every application process whose visible is true
    end tell
    return appList
    "#
    .to_string()
}

/// Number of windows the named process currently has (`0` on error).
pub fn window_count(app: &str) -> String {
    format!(
        r#"
        tell application "System Events"
            tell process {app}
                try
                    return count of windows
                on error
                    return 0
                end try
            end tell
        end tell
        "#,
        app = quote(app)
    )
}

/// `x,y,width,height` of one window, or an error-tagged message.
pub fn window_geometry(app: &str, index: usize) -> String {
    format!(
        r#"
        tell application "System Events"
            tell process {app}
                try
                    set pos to position of window {index}
                    set siz to size of window {index}
                    set px to (item 1 of pos) as text
                    set py to (item 2 of pos) as text
                    set w to (item 1 of siz) as text
                    set h to (item 2 of siz) as text
                    return px & "," & py & "," & w & "," & h
                on error errMsg
                    return "{ERROR_TAG} " & errMsg
                end try
            end tell
        end tell
        "#,
        app = quote(app)
    )
}

/// Move then resize one window, reporting `OK` or an error-tagged message.
pub fn apply_window_geometry(
    app: &str,
    index: usize,
    rect: &WindowRect,
    settle_secs: f64,
) -> String {
    format!(
        r#"
        tell application "System Events"
            tell process {app}
                try
                    set targetWindow to window {index}
                    set position of targetWindow to {{{x}, {y}}}
                    delay {settle_secs}
                    set size of targetWindow to {{{width}, {height}}}
                    return "{OK_TAG}"
                on error errMsg
                    return "{ERROR_TAG} " & errMsg
                end try
            end tell
        end tell
        "#,
        app = quote(app),
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
    )
}

/// Tab URLs of every browser window, windows joined by the outer delimiter
/// and tabs by the inner delimiter.
pub fn browser_tabs(app: &str) -> String {
    format!(
        r#"
        set windowResults to {{}}
        tell application {app}
            repeat with w from 1 to count of windows
                set windowTabs to {{}}
                repeat with t from 1 to count of tabs in window w
                    try
                        set end of windowTabs to (URL of tab t in window w) as text
                    end try
                end repeat
                set AppleScript's text item delimiters to "{INNER_DELIMITER}"
                set end of windowResults to windowTabs as text
            end repeat
        end tell
        set AppleScript's text item delimiters to "{OUTER_DELIMITER}"
        set finalResult to windowResults as text
        set AppleScript's text item delimiters to ""
        return finalResult
        "#,
        app = quote(app)
    )
}

/// Saved documents as `name:::full name` records.
pub fn saved_documents(app: &str) -> String {
    format!(
        r#"
        tell application {app}
            set docList to {{}}
            repeat with i from 1 to count of documents
                set doc to document i
                if saved of doc is true then
                    try
                        set fullName to full name of doc
                        if fullName is not "" then
                            set end of docList to (name of doc) & "{INNER_DELIMITER}" & fullName
                        end if
                    on error
                        set end of docList to (name of doc) & "{INNER_DELIMITER}"
                    end try
                end if
            end repeat
            set AppleScript's text item delimiters to "{OUTER_DELIMITER}"
            set docResult to docList as text
            set AppleScript's text item delimiters to ""
            return docResult
        end tell
        "#,
        app = quote(app)
    )
}

/// Names of all documents the app currently has open.
pub fn open_document_names(app: &str) -> String {
    format!(
        r#"
        tell application {app}
            return name of every document
        end tell
        "#,
        app = quote(app)
    )
}

/// Name of the first entry of the layouts menu.
pub fn current_layout(app: &str) -> String {
    format!(
        r#"
        tell application "System Events"
            tell process {app}
                try
                    return name of menu item 1 of menu {menu} of menu bar 1
                on error
                    return ""
                end try
            end tell
        end tell
        "#,
        app = quote(app),
        menu = quote(LAYOUTS_MENU)
    )
}

/// Click a layout by name; a missing menu item is ignored.
pub fn invoke_layout(app: &str, layout: &str) -> String {
    format!(
        r#"
        tell application "System Events"
            tell process {app}
                try
                    click menu item {layout} of menu {menu} of menu bar 1
                end try
            end tell
        end tell
        "#,
        app = quote(app),
        layout = quote(layout),
        menu = quote(LAYOUTS_MENU)
    )
}

pub fn activate(app: &str) -> String {
    format!("tell application {} to activate", quote(app))
}

/// Launch the app unless its process already exists.
pub fn ensure_launched(app: &str) -> String {
    format!(
        r#"
        tell application "System Events"
            if not (exists process {app}) then
                tell application {app} to launch
            end if
        end tell
        "#,
        app = quote(app)
    )
}

pub fn close_all_windows(app: &str) -> String {
    format!(
        r#"
        tell application {app}
            try
                close every window
            end try
        end tell
        "#,
        app = quote(app)
    )
}

/// Open one browser window seeded with `urls[0]`, then append the rest as
/// tabs in order. Returns `None` for an empty window.
pub fn open_browser_window(app: &str, urls: &[String], activate: bool) -> Option<String> {
    let (first, rest) = urls.split_first()?;
    let mut script = format!("tell application {}\n", quote(app));
    if activate {
        script.push_str("    activate\n");
    }
    script.push_str(&format!("    make new document with properties {{URL:{}}}\n", quote(first)));
    script.push_str("    set currentWindow to front window\n");
    for url in rest {
        script.push_str(&format!(
            "    make new tab at end of tabs of currentWindow with properties {{URL:{}}}\n",
            quote(url)
        ));
    }
    script.push_str("end tell\n");
    Some(script)
}

/// Convert a stored (possibly colon-separated) path to a POSIX path.
pub fn posix_path(path: &str) -> String {
    format!("return POSIX path of {}", quote(path))
}

pub fn open_document(app: &str, posix_path: &str) -> String {
    format!(
        r#"
        tell application {app}
            activate
            open POSIX file {path}
        end tell
        "#,
        app = quote(app),
        path = quote(posix_path)
    )
}
