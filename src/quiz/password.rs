//! Password hygiene questions: reuse, weak and personal passwords, passkeys and MFA.

use crate::quiz;

const QUESTIONS: &[quiz::StaticQuestion] = &[
    (
        "What is one of the most common mistakes people make with passwords?",
        &[
            ("Using two-factor authentication", false),
            ("Changing passwords regularly", false),
            ("Creating long and complex passwords", false),
            ("Reusing the same password across multiple sites", true),
        ],
        "Reusing passwords makes all your accounts vulnerable if one gets breached.",
    ),
    (
        "Which of the following is considered a weak password?",
        &[
            ("h4ppyB1rthd@y", false),
            ("12345678", true),
            ("likeadeckofcards2048", false),
            ("fG8^zL2&hJ0", false),
        ],
        "Passwords like 12345678 are among the most common and easily guessed.",
    ),
    (
        "Why should you avoid using personal info in your passwords?",
        &[
            ("It’s too boring", false),
            ("It’s too long", false),
            ("It’s easy to guess", true),
            ("It’s illegal", false),
        ],
        "Hackers often look for names, birthdays, and pet names in data breaches or social media.",
    ),
    (
        "What is the recommended minimum length for a strong password?",
        &[
            ("6 characters", false),
            ("8 characters", false),
            ("10 characters", false),
            ("12 characters", true),
        ],
        "12–16 characters is the widely recommended minimum for password security.",
    ),
    (
        "What is a 'keyboard walk' password?",
        &[
            ("A phrase from a book", false),
            ("A password using keys next to each other", true),
            ("A string of random emojis", false),
            ("A phrase translated from another language", false),
        ],
        "Examples like 'qwerty' or 'asdfgh' are called keyboard walks and are easy to guess.",
    ),
    (
        "What is the risk of using the same password on multiple accounts?",
        &[
            ("You might forget it", false),
            ("It makes logging in faster", false),
            ("It’s easier to type", false),
            ("If one account is breached, others are at risk", true),
        ],
        "Hackers can use your breached login on other websites—called credential stuffing.",
    ),
    (
        "What is a passkey?",
        &[
            ("A code stored on paper", false),
            ("A recovery email", false),
            ("Biometric or device-based authentication method", true),
            ("A dictionary word with a number", false),
        ],
        "Passkeys are modern alternatives to passwords, often using biometrics or hardware.",
    ),
    (
        "What does a password manager help with?",
        &[
            ("It shares your passwords with others", false),
            ("It stores them on your clipboard", false),
            ("It securely stores and generates strong passwords", true),
            ("It makes all passwords public", false),
        ],
        "Password managers store your credentials in an encrypted vault and help generate strong passwords.",
    ),
    (
        "What is Multi-Factor Authentication (MFA)?",
        &[
            ("Using multiple usernames", false),
            ("Using both a password and another verification method", true),
            ("Typing your password twice", false),
            ("Logging in from multiple devices", false),
        ],
        "MFA protects your account by requiring a second factor like a code or biometric scan.",
    ),
    (
        "Which of these is NOT a good password practice?",
        &[
            ("Using at least one symbol and one number", false),
            ("Generating unique passwords for each account", false),
            ("Storing passwords securely in a password manager", false),
            ("Using your name and birthday", true),
        ],
        "Personal information is predictable and commonly guessed by attackers.",
    ),
];

pub fn questions() -> Vec<quiz::Question> {
    quiz::questions_from_table(QUESTIONS)
}
