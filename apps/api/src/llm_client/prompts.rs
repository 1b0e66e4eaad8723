// All LLM prompt constants for resume parsing and content enhancement.
// Prompt text is part of the wire contract with the model: change it by
// bumping RESUME_PROMPT_VERSION so parse quality regressions can be traced
// to a prompt revision.

/// Version tag for the parse/enhance prompt set.
pub const RESUME_PROMPT_VERSION: &str = "v1";

/// System prompt for resume parsing. Lists every field of the expected
/// JSON object; missing information comes back as empty strings or arrays.
pub const RESUME_PARSE_SYSTEM: &str = r#"You are an expert resume parser and portfolio generator. Parse the provided resume text and extract structured information for creating a professional portfolio website.

Extract the following information and return it as JSON:
- name: Full name
- title: Professional title/role
- about: Professional summary (2-3 sentences)
- email: Email address
- phone: Phone number
- linkedin: LinkedIn profile URL
- github: GitHub profile URL
- website: Personal website URL
- skills: Array of technical skills
- experience: Array of work experience with company, position, startDate, endDate, description, isCurrentJob
- education: Array of education with institution, degree, field, startDate, endDate, gpa
- projects: Array of projects with name, description, technologies, url, githubUrl
- theme: Recommended theme based on profession (default, creative, technical, executive)

For dates, use format "YYYY-MM" or "YYYY" if month not specified. Use "Present" for current positions.
If information is missing, use empty string or empty array as appropriate.
Be intelligent about extracting implicit information and formatting it professionally."#;

/// Resume parsing prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str =
    "Parse this resume and extract structured portfolio data:\n\n{resume_text}";

/// System prompt for the optional content-enhancement pass.
pub const ENHANCE_SYSTEM: &str = r#"You are a professional portfolio content generator. Create enhanced, professional content for a portfolio website based on the provided data.

Enhance the about section to be more compelling and professional.
Improve project descriptions to be more engaging and highlight achievements.
Ensure all content is professional, error-free, and optimized for a portfolio website.
Maintain the original structure but enhance the quality and impact of the content.

Return the enhanced data in the same JSON format as provided."#;

/// Enhancement prompt template. Replace `{portfolio_json}` before sending.
pub const ENHANCE_PROMPT_TEMPLATE: &str =
    "Enhance this portfolio content:\n\n{portfolio_json}";
