// src/resume/generator.rs
//! Resume text to schema-conforming YAML, through the language model.

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use super::llm::OpenAiClient;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates structured YAML content from resume files, paying close attention to format requirements and schema structure.";

/// Render the user prompt embedding the full resume text and the schema
/// dumped back to YAML. The model is instructed to wrap its answer in
/// `<resume_yaml>` tags.
pub fn render_prompt(resume_text: &str, schema: &Value) -> Result<String> {
    let schema_yaml =
        serde_yaml::to_string(schema).context("Failed to render schema as YAML")?;

    Ok(format!(
        r#"I'm sending you the content of a text-based resume. Your task is to interpret this content and generate a YAML file that conforms to the following schema structure.
The generated YAML should include all required fields and follow the structure defined in the schema.

Pay special attention to the property attributes in the schema. These indicate the expected type and format for each field:
- 'type': Specifies the data type (e.g., string, object, array)
- 'format': Indicates a specific format for certain fields:
- 'date' format should be a valid date (e.g., YYYY-MM-DD)
- 'phone_prefix' format should be a valid country code with a '+' prefix (e.g., +1 for US)
- 'phone' format should be a valid phone number
- 'email' format should be a valid email address
- 'uri' format should be a valid URL
- 'enum': Provides a list of allowed values for a field

Important instructions:
1. Ensure that the YAML structure matches exactly with the provided schema. Use a dictionary structure that mirrors the schema.
2. For all sections, if information is not explicitly provided in the resume, make a best guess based on the context of the resume. This is CRUCIAL for the following fields:
- languages: Infer from the resume content or make an educated guess. Use the 'enum' values for proficiency.
- interests: Deduce from the overall resume or related experiences.
- availability (notice_period): Provide a reasonable estimate (e.g., "2 weeks" or "1 month").
- salary_expectations (salary_range_usd): Estimate based on experience level and industry standards.
- self_identification: Make reasonable assumptions based on the resume context. Use 'enum' values where provided.
- legal_authorization: Provide plausible values based on the resume information. Use 'Yes' or 'No' as per the 'enum' values.
- work_preferences: Infer from job history, skills, and overall resume tone. Use 'Yes' or 'No' as per the 'enum' values.
3. For the fields mentioned in point 2, always provide a value. Do not leave them blank or omit them.
4. For the 'key_responsibilities' field in 'experience_details', format the responsibilities as follows:
responsibility_1: "Description of first responsibility"
responsibility_2: "Description of second responsibility"
responsibility_3: "Description of third responsibility"
responsibility_4: "Description of fourth responsibility"
Continue this pattern for all responsibilities listed.
5. In the 'experience_details' section, ensure that 'position' comes before 'company' in each entry.
6. For the 'skills_acquired' field in 'experience_details', infer relevant skills based on the job responsibilities and industry. Do not leave this field empty.
7. Make reasonable inferences for any missing dates, such as date_of_birth or employment dates, ensuring they follow the 'date' format.
8. For array types (e.g., education_details, experience_details), ensure to include all required fields for each item as specified in the schema.

Resume Text Content:
{resume_text}

YAML Schema:
{schema_yaml}

Generate the YAML content that matches this schema based on the resume content provided, ensuring all format hints are followed and making educated guesses where necessary. Be sure to include best guesses for ALL fields, even if not explicitly mentioned in the resume.
Enclose your response in <resume_yaml> tags. Only include the YAML content within these tags, without any additional text or code block markers."#
    ))
}

/// Pull the YAML body out of the model's tagged response. A response without
/// the tags is a hard error.
pub fn extract_tagged_yaml(response: &str) -> Result<String> {
    let pattern = Regex::new(r"(?s)<resume_yaml>(.*?)</resume_yaml>")
        .context("Failed to compile tag pattern")?;

    let captures = pattern
        .captures(response)
        .context("YAML content not found in the expected format")?;

    Ok(captures[1].trim().to_string())
}

/// Full pipeline for one resume: prompt, model call, tag extraction.
pub async fn generate_resume_yaml(
    client: &OpenAiClient,
    resume_text: &str,
    schema: &Value,
) -> Result<String> {
    let prompt = render_prompt(resume_text, schema)?;
    let response = client.chat(SYSTEM_PROMPT, &prompt).await?;
    extract_tagged_yaml(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_tagged_yaml() {
        let response = "Here you go:\n<resume_yaml>\npersonal_information:\n  name: Ada\n</resume_yaml>\nDone.";
        assert_eq!(
            extract_tagged_yaml(response).expect("tags present"),
            "personal_information:\n  name: Ada"
        );
    }

    #[test]
    fn test_extract_spans_lines() {
        let response = "<resume_yaml>\na: 1\nb:\n  - x\n  - y\n</resume_yaml>";
        assert_eq!(
            extract_tagged_yaml(response).expect("tags present"),
            "a: 1\nb:\n  - x\n  - y"
        );
    }

    #[test]
    fn test_missing_tags_is_error() {
        let err = extract_tagged_yaml("personal_information:\n  name: Ada")
            .expect_err("no tags");
        assert!(err.to_string().contains("expected format"));
    }

    #[test]
    fn test_prompt_embeds_resume_and_schema() {
        let schema = json!({"type": "object", "properties": {"name": {"type": "string"}}});
        let prompt = render_prompt("Ada Lovelace, Analyst", &schema).expect("prompt");
        assert!(prompt.contains("Ada Lovelace, Analyst"));
        assert!(prompt.contains("type: object"));
        assert!(prompt.contains("<resume_yaml>"));
    }
}
