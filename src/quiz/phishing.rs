//! Phishing questions: email, SMS, voice and QR lures.

use crate::quiz;

const QUESTIONS: &[quiz::StaticQuestion] = &[
    (
        "What is the main goal of a phishing attack?",
        &[
            ("To speed up computer performance", false),
            ("To steal sensitive information like passwords", true),
            ("To install software updates", false),
            ("To promote legitimate services", false),
        ],
        "Phishing attacks aim to trick you into revealing sensitive data like passwords or credit card numbers.",
    ),
    (
        "Which of the following is a sign that an email might be a phishing attempt?",
        &[
            ("An email asking you to 'verify your account immediately'", true),
            ("A monthly newsletter from a service you use", false),
            ("A birthday greeting from a friend", false),
            ("A receipt from a recent online purchase", false),
        ],
        "Email phishing involves fake emails impersonating trusted companies to trick victims.",
    ),
    (
        "What makes spear phishing more dangerous than regular phishing?",
        &[
            ("It uses physical mail instead of email", false),
            ("It is sent to many random people", false),
            ("It targets specific individuals with personalized details", true),
            ("It uses QR codes", false),
        ],
        "Spear phishing is tailored to specific people, using details like names or workplaces to seem more convincing.",
    ),
    (
        "What is 'smishing'?",
        &[
            ("Phishing using SMS or text messages", true),
            ("A scam involving voice calls", false),
            ("Using social media to trick people", false),
            ("A fake link embedded in a QR code", false),
        ],
        "Smishing is phishing via SMS messages and often contains fake urgent links or threats.",
    ),
    (
        "Which of the following could be a sign of phishing?",
        &[
            ("A personal email from a trusted coworker", false),
            ("A message pressuring you to act immediately", true),
            ("An email from your saved contact list", false),
            ("An SMS from a sender called 'gov.sg'", false),
        ],
        "Phishing often uses urgency or threats to pressure victims into acting quickly without thinking.",
    ),
    (
        "What is an example of a spoofed sender address?",
        &[
            ("user28ch92oef_fjls3k", false),
            ("account.micorsoft.com", false),
            ("support@payp4l.com", false),
            ("All of the above", true),
        ],
        "Spoofed addresses mimic real ones with minor changes like swapping letters or adding characters, or they might contain gibberish characters.",
    ),
    (
        "What should you do before clicking a link in an email?",
        &[
            ("Click quickly to avoid missing out", false),
            ("Hover over the link to preview the URL", true),
            ("Forward it to a friend", false),
            ("Call your bank immediately", false),
        ],
        "Always hover over links to verify the actual destination before clicking to avoid phishing traps.",
    ),
    (
        "How does clone phishing work?",
        &[
            ("By stealing cookies from browsers", false),
            ("By copying a real email and adding malicious content", true),
            ("By hacking your Wi-Fi", false),
            ("By sending ads to your email", false),
        ],
        "Clone phishing copies legitimate emails but modifies them to include malicious links or attachments.",
    ),
    (
        "What is the best action if you receive a suspicious call asking for your bank info?",
        &[
            ("Give partial info first", false),
            ("Hang up and check with the official bank company", true),
            ("Press the buttons they tell you to", false),
            ("Stay on the line to gather evidence", false),
        ],
        "Never share information on suspicious calls — always hang up and call the official number yourself.",
    ),
    (
        "Why should you be cautious when scanning random QR codes?",
        &[
            ("They might contain spoilers", false),
            ("They can open a link to harmful websites", true),
            ("They rarely work", false),
            ("They might play loud sounds", false),
        ],
        "Attackers use QR codes to redirect you to malicious websites or prompt downloads of harmful apps.",
    ),
];

pub fn questions() -> Vec<quiz::Question> {
    quiz::questions_from_table(QUESTIONS)
}
