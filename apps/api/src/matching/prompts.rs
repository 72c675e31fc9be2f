// Prompts for the semantic feedback provider.

pub const FEEDBACK_SYSTEM: &str = "You are an experienced technical recruiter reviewing a \
    candidate's resume against a job description. You give concrete, honest feedback. \
    You MUST respond with valid JSON only. Do NOT use markdown code fences.";

pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"Analyze how well the resume matches the job description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return a JSON object with exactly these keys:
{
  "strengths": ["<what the resume already covers well for this job>"],
  "weaknesses": ["<requirements of the job the resume does not show>"],
  "suggestions": ["<specific, actionable edits to the resume for this job>"]
}

Each list holds short sentences, at most 5 items. Do not include a score."#;

const RESUME_SLOT: &str = "{resume_text}";
const JOB_DESCRIPTION_SLOT: &str = "{job_description}";

/// Fills the template in one pass. Inserted documents are never scanned for
/// placeholders, so a resume quoting `{job_description}` stays literal.
pub fn build_feedback_prompt(resume_text: &str, job_description: &str) -> String {
    let mut prompt = String::with_capacity(
        FEEDBACK_PROMPT_TEMPLATE.len() + resume_text.len() + job_description.len(),
    );
    let mut rest = FEEDBACK_PROMPT_TEMPLATE;
    while let Some(start) = rest.find('{') {
        let (literal, tail) = rest.split_at(start);
        prompt.push_str(literal);
        if let Some(after) = tail.strip_prefix(RESUME_SLOT) {
            prompt.push_str(resume_text);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(JOB_DESCRIPTION_SLOT) {
            prompt.push_str(job_description);
            rest = after;
        } else {
            prompt.push('{');
            rest = &tail[1..];
        }
    }
    prompt.push_str(rest);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_substitutes_both_documents() {
        let prompt = build_feedback_prompt("RESUME BODY", "JD BODY");
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(!prompt.contains("{job_description}"));
    }

    #[test]
    fn test_placeholder_text_inside_a_document_is_kept_literal() {
        let resume = "Templating work: rendered {job_description} and {resume_text} tokens";
        let prompt = build_feedback_prompt(resume, "Rust backend role");
        assert!(prompt.contains(resume));
        assert_eq!(prompt.matches("Rust backend role").count(), 1);
        assert_eq!(prompt.matches("{job_description}").count(), 1);
        assert!(prompt.contains("{\n  \"strengths\""));
    }
}
