// All LLM prompt constants for the tailoring module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Bumped whenever the wording or formatting rules below change.
pub const TEMPLATE_VERSION: &str = "2024-06.1";

/// Name of the forced tool the model answers through.
pub const OUTPUT_TOOL_NAME: &str = "submit_tailoring";

pub const OUTPUT_TOOL_DESCRIPTION: &str =
    "Submit the tailoring suggestions and the complete tailored resume.";

/// System prompt for tailoring.
pub const TAILOR_SYSTEM: &str = "You are an expert resume writer and career coach. \
    You tailor resumes to specific job descriptions so that they pass applicant-tracking \
    systems and read well to a hiring manager.";

/// Opening of the user turn. Replace: {grounding_instruction}, {ats_rules}
pub const TAILOR_PREAMBLE_TEMPLATE: &str = r#"Your task is to take a user's resume and a job description, and create a new, perfectly tailored resume for that specific job.

First, provide suggestions for improvement. Focus on highlighting relevant skills and experiences, and on incorporating keywords from the job description. Write them as a short list the candidate can act on.

Second, generate a complete, professionally formatted resume based on your suggestions. The output must be the full resume, not just the changes.

{grounding_instruction}

FORMATTING RULES for the full resume:
{ats_rules}

Here is the user's information:"#;

/// ATS layout constraints embedded in the preamble.
pub const ATS_RULES: &str = "\
1. Section order: Contact Information, Professional Summary, Skills, Experience, Projects, Education, Certifications. Omit sections the candidate has no content for.
2. Plain single-column text. No tables, columns, text boxes, images, icons, or graphics.
3. Standard section headings in capitals (e.g. EXPERIENCE), one blank line between sections.
4. Experience in reverse-chronological order: title, employer, location, dates on one line, then bullets starting with '- '.
5. Start every bullet with a strong action verb; keep bullets to one or two lines; quantify impact where the original resume supports it.
6. Mirror exact keywords and skill names from the job description where they truthfully apply.
7. Professional, confident tone in the third person implied (no 'I', no 'my').";

pub const RESUME_FILE_LABEL: &str = "Resume File:";
pub const RESUME_TEXT_LABEL: &str = "Resume Text:";
pub const JOB_DESCRIPTION_LABEL: &str = "Job Description:";

pub const TAILOR_CLOSING: &str = "Provide your response by calling the submit_tailoring tool, \
    with both the suggestions and the full tailored resume text.";
