//! Safe browsing questions: lookalike domains, shortened links and URL scanners.

use crate::quiz;

const QUESTIONS: &[quiz::StaticQuestion] = &[
    (
        "Which of the following URLs is most likely a phishing attempt?",
        &[
            ("https://accounts.google.com/login", false),
            ("https://secure-login-google.com/account", true),
            ("https://www.google.com/securelogin", false),
            ("https://mail.google.com/login", false),
        ],
        "Phishing URLs often mimic real domains but slightly alter or add words. 'secure-login-google.com' is not owned by Google.",
    ),
    (
        "You see this link in an email: https://www.paypa1.com/login (note the character '1'). What type of attack is this?",
        &[
            ("Homograph attack", true),
            ("Typosquatting", false),
            ("Clickjacking", false),
            ("Man-in-the-middle", false),
        ],
        "Homograph attacks use lookalike characters (like '1' instead of 'l') to trick users into clicking malicious links.",
    ),
    (
        "Which part of the URL below is the actual domain?\n\nhttps://login.secure.facebook.com.evilsite.ru/login",
        &[
            ("secure.facebook.com", false),
            ("facebook.com", false),
            ("evilsite.ru", true),
            ("login.secure.facebook.com", false),
        ],
        "The actual domain is the last part before the TLD — 'evilsite.ru'. The rest is subdomain trickery.",
    ),
    (
        "What is a common tactic used in shortened URLs (e.g., bit.ly/abalskdjf)?",
        &[
            ("To hide the true destination of a link", true),
            ("To show the site's SSL certificate", false),
            ("To prevent phishing", false),
            ("To extend the link length", false),
        ],
        "Shortened URLs can obscure the final destination, making it easier for attackers to trick users.",
    ),
    (
        "Which of the following is a safe step when receiving a suspicious link?",
        &[
            ("Click it quickly to avoid missing out", false),
            ("Hover over the link to preview the real destination", true),
            ("Forward it to others to ask if it's safe", false),
            ("Paste it directly in the address bar", false),
        ],
        "Hovering reveals the actual URL and can help you spot mismatches or fake domains.",
    ),
    (
        "True or False: A padlock icon in the address bar means the website is completely safe.",
        &[
            ("True", false),
            ("False", true),
        ],
        "The padlock only shows the site uses HTTPS; it doesn’t guarantee the site is legitimate.",
    ),
    (
        "Which tool would best help reveal where this shortened URL goes: https://bit.ly/3gU2zK9?",
        &[
            ("unshorten.me", true),
            ("Wikipedia", false),
            ("Facebook", false),
            ("Google Translate", false),
        ],
        "Use URL unshortening tools like unshorten.me to preview the real destination before clicking.",
    ),
    (
        "What is a sign that a URL might be unsafe or suspicious?",
        &[
            ("It uses many hyphens or random letters in the domain", true),
            ("It loads slowly", false),
            ("It uses capital letters", false),
            ("It’s hosted in another country", false),
        ],
        "Attackers often register odd-looking domains to mimic legitimate sites with hyphens or typos.",
    ),
    (
        "You receive an email saying: 'Your bank account is locked! Visit secure-yourbank.com now.' What should you do?",
        &[
            ("Click the link and enter your info", false),
            ("Search for your bank's official site separately and check your account there", true),
            ("Reply to the email to verify your bank account", false),
            ("Ignore it, it's definitely fake", false),
        ],
        "Don't trust links in unsolicited messages—go directly to the official site through search or bookmarks.",
    ),
    (
        "Which of the following is a legitimate reason to use a URL scanner like VirusTotal?",
        &[
            ("To analyze suspicious links before visiting them", true),
            ("To find coupons online", false),
            ("To speed up your internet", false),
            ("To update your antivirus", false),
        ],
        "URL scanners like VirusTotal help detect threats such as malware or phishing in links.",
    ),
];

pub fn questions() -> Vec<quiz::Question> {
    quiz::questions_from_table(QUESTIONS)
}
