//! Prompt building for the relay flows.
//!
//! One builder per flow. Prompts are deliberately explicit about output
//! format - the cleanup pipeline downstream only repairs what these
//! instructions fail to prevent.

/// System message for the trip itinerary flow.
pub const TRIP_SYSTEM_PROMPT: &str = r#"Expand this guide into a full 7-day travel itinerary with detailed per-day plans, including weather forecasts, places to eat, packing suggestions, and a budget breakdown.

You MUST suggest actual places to visit, actual hotels to stay and actual restaurants to go to.

This itinerary should cover all aspects of the trip, from arrival to departure, integrating the city guide information with practical travel logistics.

Your final answer MUST be a complete expanded travel plan, formatted as markdown, encompassing a daily schedule, anticipated weather conditions, recommended clothing and items to pack, and a detailed budget. Be specific and give a reason why you picked each place and what makes it special."#;

/// Build the ICP generation prompt for a company website.
pub fn build_icp_prompt(website: &str) -> String {
    format!(
        r#"Generate an Ideal Customer Profile (ICP) for the company {website}. The ICP should be comprehensive and structured, covering the following sections:

Company Overview
Brief description of {website}, including its core offerings and key value propositions.

Demographic and Firmographic Characteristics
Industry Sectors: Identify relevant industries (e.g., Technology Startups, E-commerce, Healthcare, Education, Finance and Fintech, Retail) that would benefit from {website}'s services.
Company Size: Specify the ideal company sizes (e.g., Small to Medium Enterprises with 10-200 employees, Mid-sized to Large Enterprises with 200-1000+ employees).
Geographical Location: Define primary and secondary markets.
Revenue: Indicate the typical annual revenue range.

Key Roles and Decision Makers
List the primary decision-makers and influencers within target companies (e.g., CTOs, CIOs, CEOs, IT Managers, Product Managers, Startup Founders).

Technographic Characteristics
Current technology stack, specific software needs, and interest in emerging technologies.

Pain Points
Identify common challenges faced by ideal customers (e.g., scalability, customization, time-to-market, integration, user experience, security and compliance).

Behavioral Traits
Decision-making process, buying motivations, and customer loyalty.

Psychographic Characteristics
Core values and primary objectives of ideal customers.

Communication Preferences
Preferred channels and the types of content they engage with.

Example Ideal Customers
Provide specific examples of ideal customer types across the identified industries.

Summary
Concisely summarize the Ideal Customer Profile, emphasizing the key characteristics that make a company an ideal customer for {website}.

Additional Instructions:
Ensure the ICP is tailored specifically to {website}'s services and market positioning.
Use clear headings and bullet points for readability.
Provide actionable insights that can help {website} align its marketing, sales, and product development strategies with the identified ideal customers."#
    )
}

/// Build the search-parameter extraction prompt from ICP text.
pub fn build_params_prompt(icp_text: &str) -> String {
    format!(
        r#"{icp_text}

Get me these details from the above context:

1. organization_locations
2. organization_num_employees_ranges
3. person_titles
4. q_organization_keyword_tags

Return all values in arrays, and return only values without any explanation, as JSON."#
    )
}

/// Build the prospect discovery prompt for an ICP.
pub fn build_prospects_prompt(icp_text: &str, count: usize) -> String {
    format!(
        r#"Generate a list of potential LinkedIn prospects based on the following Ideal Customer Profile (ICP).

The output must be a JSON array where each element is an object with the fields: "Name", "Email", "LinkedIn Profile URL", "Title", "Company", "Location". Ensure the JSON is properly formatted.

Additional instructions:
- Ensure the LinkedIn Profile URL links directly to the prospect's LinkedIn page.
- If emails are not available, leave the email field blank.
- Focus on high-value prospects that align with the ICP.
- Ensure diverse representation across target industries and geographic regions.

Example output:
```json
[
    {{
        "Name": "John Doe",
        "Company": "Tech Innovators Inc.",
        "Email": "",
        "LinkedIn Profile URL": "linkedin.com/in/johndoe",
        "Title": "CTO",
        "Location": "San Francisco, USA"
    }}
]
```

IMPORTANT: Only output the JSON array enclosed within the ```json``` code block. Do not include any additional text, explanations, or comments. Ensure that there are exactly {count} prospect entries without any trailing commas or syntax errors.

Ideal Customer Profile:
{icp_text}"#
    )
}

/// Build the user message for the trip itinerary flow.
pub fn build_trip_prompt(origin: &str, cities: &[String], date_range: &str, interests: &str) -> String {
    format!(
        r#"Please create a travel plan with the following details:
Starting from: {origin}
Cities to visit: {cities}
Date range: {date_range}
Interests and preferences: {interests}

Complete expanded travel plan with daily schedule, weather conditions, packing suggestions, and budget breakdown."#,
        cities = cities.join(", ")
    )
}

/// Build the image generation prompt, appending the reference note when the
/// caller supplied one.
pub fn build_image_prompt(prompt: &str, reference_note: Option<&str>) -> String {
    match reference_note {
        Some(note) if !note.trim().is_empty() => format!("{prompt} {}", note.trim()),
        _ => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icp_prompt_mentions_website() {
        let prompt = build_icp_prompt("acme.example");
        assert!(prompt.contains("acme.example"));
        assert!(prompt.contains("Pain Points"));
        assert!(prompt.contains("Summary"));
    }

    #[test]
    fn test_params_prompt_lists_all_fields() {
        let prompt = build_params_prompt("some icp text");
        for field in [
            "organization_locations",
            "organization_num_employees_ranges",
            "person_titles",
            "q_organization_keyword_tags",
        ] {
            assert!(prompt.contains(field), "missing {field}");
        }
        assert!(prompt.starts_with("some icp text"));
    }

    #[test]
    fn test_prospects_prompt_embeds_count_and_contract() {
        let prompt = build_prospects_prompt("fintech CTOs in Europe", 10);
        assert!(prompt.contains("exactly 10 prospect entries"));
        assert!(prompt.contains("LinkedIn Profile URL"));
        assert!(prompt.contains("fintech CTOs in Europe"));
    }

    #[test]
    fn test_trip_prompt_joins_cities() {
        let cities = vec!["Lisbon".to_string(), "Porto".to_string()];
        let prompt = build_trip_prompt("Oslo", &cities, "June 1-8", "food");
        assert!(prompt.contains("Lisbon, Porto"));
        assert!(prompt.contains("Starting from: Oslo"));
    }

    #[test]
    fn test_image_prompt_reference_note() {
        assert_eq!(build_image_prompt("a fox", None), "a fox");
        assert_eq!(
            build_image_prompt("a fox", Some("with inspiration from the reference image.")),
            "a fox with inspiration from the reference image."
        );
        assert_eq!(build_image_prompt("a fox", Some("   ")), "a fox");
    }
}
