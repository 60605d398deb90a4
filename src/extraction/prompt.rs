/// Instruction sent alongside every timecard image.
pub const EXTRACTION_PROMPT: &str = r#"
You are given an image of a timecard. Your task is to extract the working hours for each day of the week.

Return the result as a JSON list, where each item looks like this:

{
  "day": "Monday",
  "time_in": "08:00 AM",
  "time_out": "04:30 PM"
}

- Only include days that are present on the timecard.
- Use 12-hour format with AM/PM.
- Do not include any extra commentary, just valid JSON.
"#;
