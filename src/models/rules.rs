// Fixed keyword tables shared by the validator and the field extractors.
// All Latin entries are lowercase; callers lowercase the text before matching.

/// Phrases that only appear on a genuine card (+15 each)
pub const AUTHENTICITY_KEYWORDS: &[&str] = &[
    "government of india",
    "govt of india",
    "unique identification authority",
    "uidai",
    "aadhaar",
    "aadhar",
    "enrolment",
    "mera aadhaar",
    "भारत सरकार",
    "आधार",
    "भारतीय विशिष्ट पहचान प्राधिकरण",
];

/// Terms from other document types (-20 each)
pub const DISQUALIFYING_KEYWORDS: &[&str] = &[
    "passport",
    "license",
    "licence",
    "income tax",
    "permanent account number",
    "election commission",
    "bank statement",
    "account statement",
    "credit card",
    "debit card",
    "invoice",
    "united states",
];

/// States and union territories
pub const REGION_NAMES: &[&str] = &[
    "andhra pradesh",
    "arunachal pradesh",
    "assam",
    "bihar",
    "chhattisgarh",
    "goa",
    "gujarat",
    "haryana",
    "himachal pradesh",
    "jharkhand",
    "karnataka",
    "kerala",
    "madhya pradesh",
    "maharashtra",
    "manipur",
    "meghalaya",
    "mizoram",
    "nagaland",
    "odisha",
    "punjab",
    "rajasthan",
    "sikkim",
    "tamil nadu",
    "telangana",
    "tripura",
    "uttar pradesh",
    "uttarakhand",
    "west bengal",
    "delhi",
    "jammu and kashmir",
    "ladakh",
    "puducherry",
    "chandigarh",
    "lakshadweep",
    "andaman and nicobar islands",
    "dadra and nagar haveli and daman and diu",
];

/// Heading phrases printed just above the holder's name
pub const AUTHORITY_PHRASES: &[&str] = &[
    "government of",
    "govt of",
    "authority",
    "भारत सरकार",
    "सरकार",
];

/// Words that mark an institutional line rather than a person
pub const INSTITUTIONAL_KEYWORDS: &[&str] = &[
    "authority",
    "government",
    "unique",
    "identification",
    "card",
    "limited",
    "limted",
    "lirnited",
    "limitcd",
    "llmited",
];

/// Common surname roots, matched as word prefixes
pub const SURNAME_ROOTS: &[&str] = &[
    "kumar", "singh", "sharma", "verma", "gupta", "patel", "shah", "reddy", "rao", "khan",
    "yadav", "jain", "mishra", "pandey", "joshi", "nair", "iyer", "mehta", "agarwal", "das",
    "chauhan", "thakur", "pillai", "naidu", "kulkarni", "deshmukh", "patil",
];

/// Devanagari terms printed on a card, used as header markers
pub const SECONDARY_HEADER_TERMS: &[&str] = &["भारत", "सरकार", "आधार", "पता", "जन्म", "पुरुष", "महिला"];

/// Secondary-script words as they come out of a Latin-only recognizer
pub const TRANSLITERATED_VOCABULARY: &[&str] = &[
    "bharat", "sarkar", "aadhaar", "aadhar", "janm", "tithi", "purush", "mahila", "pita",
    "pati", "pata", "naam", "ling", "varsh", "pehchan", "praadhikaran",
];

/// Words whose presence marks a line as meaningful even when it is short
pub const KNOWN_VOCABULARY: &[&str] = &[
    "government", "india", "male", "female", "dob", "birth", "year", "address", "aadhaar",
    "aadhar", "authority", "unique", "identification", "road", "nagar", "dist", "pin",
    "enrolment", "father", "husband", "gender", "name",
];

/// Labels announcing the birth date on the same line
pub const BIRTH_DATE_LABELS: &[&str] = &["dob", "d.o.b", "date of birth", "birth", "जन्म तिथि", "जन्म"];

/// Labels announcing the 12-digit number
pub const UID_LABELS: &[&str] = &[
    "aadhaar no",
    "aadhaar number",
    "aadhar no",
    "aadhar number",
    "your aadhaar",
    "uid",
    "आधार संख्या",
    "आधार क्रमांक",
];

/// Keywords that disqualify a bottom line from holding the UID
pub const UID_EXCLUSION_KEYWORDS: &[&str] = &[
    "dob", "birth", "male", "female", "gender", "phone", "mobile", "mob", "date", "yob", "जन्म",
];

/// Words that mark a line as a street address
pub const STREET_KEYWORDS: &[&str] = &[
    "road", "rd", "street", "st", "lane", "nagar", "colony", "sector", "house", "h.no", "flat",
    "apartment", "apt", "building", "bldg", "floor", "plot", "near", "opp", "marg", "chowk",
    "society", "block", "ward", "village", "vill", "po", "c/o", "s/o", "w/o", "d/o",
];
