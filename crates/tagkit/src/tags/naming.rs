//! Naming helpers shared by the builders and the conversion layer.
//!
//! - [`slugify`]: `"In Progress"` -> `"in-progress"` (lowercase, whitespace runs become `-`)
//! - [`to_title_case`]: `"file-types"` / `"file_types"` -> `"File Types"`

/// Lowercases `name` and collapses every whitespace run into a single hyphen.
///
/// # Examples
/// ```
/// use tagkit::tags::naming::slugify;
///
/// assert_eq!(slugify("In Progress"), "in-progress");
/// assert_eq!(slugify("Blog  Post"), "blog-post");
/// assert_eq!(slugify("urgent"), "urgent");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.extend(ch.to_lowercase());
            in_space = false;
        }
    }
    slug
}

/// Turns a kebab-case or snake_case id into a display name.
///
/// Hyphens and underscores become spaces and every word starts uppercase. The
/// rest of each word is left as is.
///
/// # Examples
/// ```
/// use tagkit::tags::naming::to_title_case;
///
/// assert_eq!(to_title_case("file-types"), "File Types");
/// assert_eq!(to_title_case("user_status"), "User Status");
/// assert_eq!(to_title_case("priority"), "Priority");
/// ```
pub fn to_title_case(id: &str) -> String {
    let mut out = String::with_capacity(id.len());
    let mut prev_word = false;
    for ch in id.chars() {
        let ch = if ch == '-' || ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !prev_word {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch);
        }
        prev_word = is_word;
    }
    out
}
