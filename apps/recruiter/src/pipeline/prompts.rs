// Screening pipeline LLM prompt templates.
// Placeholders in braces are substituted with `str::replace` before sending.

/// Extraction prompt. Replace `{resume_text}` before sending.
pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are a Senior Technical Recruiter.
Extract the following from the resume text:
- Name (Full Name)
- Email
- Years of Experience (Numeric estimate)
- Key Skills (List of technical skills)
- Summary (2 sentence professional summary)

If a value cannot be found, use null. Use "Unknown" as the name if none is present.

Resume Text:
{resume_text}

Return a JSON object in this EXACT format:
{
  "name": "...",
  "email": "...",
  "years_of_experience": 5,
  "skills": ["..."],
  "summary": "..."
}"#;

/// Qualifying keywords appended to the candidate name in the web search.
pub const SEARCH_QUERY_SUFFIX: &str = "software engineer linkedin github";

/// Verification prompt. Replace `{name}` and `{search_results}` before sending.
pub const VERIFICATION_PROMPT_TEMPLATE: &str = r#"You are a background checker.
Summarize these search results for candidate '{name}'.
Focus on:
- Current Role/Company
- GitHub Activity (if visible)
- Consistency with a resume (do they look like a real developer?)

If the search results are empty or report a failure, say so plainly.

Search Results:
{search_results}"#;

/// Fixed requirements every candidate is scored against.
pub const JOB_DESCRIPTION: &str = "\
Job Title: Senior AI Engineer
Requirements:
- 5+ years of Python experience
- Experience with LLMs (LangChain, OpenAI, HuggingFace)
- Knowledge of Vector Databases (Pinecone, Chroma)
- Strong backend skills (FastAPI/Django)
- Good communication skills";

/// Decision prompt. Replace `{profile}`, `{verification}` and `{job_description}`.
pub const DECISION_PROMPT_TEMPLATE: &str = r#"You are the Hiring Manager. Evaluate this candidate based on the Job Description.

Candidate Profile: {profile}
Research Findings: {verification}

Job Description:
{job_description}

Task:
1. Assign a Score (integer 0-100).
2. Make a Decision: exactly one of "Hire", "Interview" or "Reject".
3. Draft a short, personalized email to the candidate.

Return a JSON object in this EXACT format:
{
  "score": 85,
  "decision": "Interview",
  "email": "Subject: ... Body: ..."
}"#;
