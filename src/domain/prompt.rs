use super::AttachedFile;

pub const ATTACHMENTS_HEADER: &str = "\n\nAttached files:\n";

/// Build the provider prompt: the message, then one manifest line per file.
///
/// Only names and declared types go into the prompt; file contents are not
/// inlined.
pub fn build_prompt(message: &str, files: &[AttachedFile]) -> String {
    let mut prompt = message.to_string();

    if !files.is_empty() {
        prompt.push_str(ATTACHMENTS_HEADER);
        for file in files {
            prompt.push_str(&file.manifest_line());
            prompt.push('\n');
        }
    }

    prompt
}
