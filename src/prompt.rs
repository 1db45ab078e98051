//! System prompt construction for the store assistant persona
//!
//! The prompt is rebuilt on every turn: the base sales persona, plus a belt
//! disclaimer when the customer mentions belts.

/// Base persona establishing the assistant's role on the sales floor
pub const BASE_SYSTEM_MESSAGE: &str = r"You are a helpful assistant in a clothes store. You should try to gently encourage
the customer to try items that are on sale. Hats are 60% off, and most other items are 50% off.
For example, if the customer says 'I'm looking to buy a hat',
you could reply something like, 'Wonderful - we have lots of hats - including several that are part of our sales event.'
Encourage the customer to buy hats if they are unsure what to get.

If the customer asks for shoes, you should respond that shoes are not on sale today,
but remind the customer to look at hats!";

/// Appended when the customer mentions belts
pub const BELT_ADDON: &str = " The store does not sell belts; if you are asked for belts, be sure to point out other items on sale.";

/// Compose the system prompt for one turn.
///
/// The belt disclaimer is appended when the message contains "belt" in any
/// letter case. Pure function over all inputs; the trigger match is
/// case-insensitive but the returned text keeps its authored casing.
pub fn compose_system_prompt(user_message: &str) -> String {
    let mut prompt = BASE_SYSTEM_MESSAGE.to_string();
    if user_message.to_lowercase().contains("belt") {
        prompt.push_str(BELT_ADDON);
    }
    prompt
}
