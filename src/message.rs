//! Pure formatting of the release notification message.
//!
//! No I/O; the same inputs always render the same string.

/// Marker for the changelog heading GitHub prepends to generated release
/// notes. Lines containing it are dropped so the heading is not repeated
/// inside the code block.
const CHANGELOG_HEADING: &str = "What's Changed";

/// Render the notification message sent to every webhook.
///
/// The changelog lines are wrapped in a Slack code block, one line per row.
/// Whitespace in the lines is preserved as given; nothing is truncated or
/// escaped.
///
/// # Arguments
/// * `project_name` - The project being released
/// * `released_by` - Who triggered the release
/// * `git_hash` - The released commit
/// * `author` - Display name or handle of the change author
/// * `changelog` - Changelog lines, in order
pub fn build_message(
    project_name: &str,
    released_by: &str,
    git_hash: &str,
    author: &str,
    changelog: &[String],
) -> String {
    let mut message = format!(
        "*Release Notification:*\n\
         *Project:* {}\n\
         *Released by:* {}\n\
         *Commit:* {}\n\
         *Author:* {}\n\
         *What's Changed:*\n\
         ```\n",
        project_name, released_by, git_hash, author
    );

    for change in changelog {
        if change.contains(CHANGELOG_HEADING) {
            continue;
        }
        message.push_str(change);
        message.push('\n');
    }

    message.push_str("```");

    message
}
