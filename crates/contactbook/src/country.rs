//! Country dial codes for composing full phone numbers.
//!
//! The table lists each country once with its international calling code.
//! A few NANP members carry their area code in the dial code (for example
//! Bahamas `+1242`), so a local number is always the trailing 10 digits.

/// A country and its international dial code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// English country name.
    pub name: &'static str,
    /// Dial code including the leading `+`.
    pub dial_code: &'static str,
}

impl Country {
    const fn new(name: &'static str, dial_code: &'static str) -> Self {
        Self { name, dial_code }
    }

    /// The `"Name (+code)"` label shown in country pickers.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.dial_code)
    }
}

/// Number of digits in a local phone number.
pub const LOCAL_NUMBER_DIGITS: usize = 10;

/// All known countries, alphabetically by name.
pub static COUNTRIES: &[Country] = &[
    Country::new("Afghanistan", "+93"),
    Country::new("Albania", "+355"),
    Country::new("Algeria", "+213"),
    Country::new("Andorra", "+376"),
    Country::new("Angola", "+244"),
    Country::new("Argentina", "+54"),
    Country::new("Armenia", "+374"),
    Country::new("Australia", "+61"),
    Country::new("Austria", "+43"),
    Country::new("Azerbaijan", "+994"),
    Country::new("Bahamas", "+1242"),
    Country::new("Bahrain", "+973"),
    Country::new("Bangladesh", "+880"),
    Country::new("Belarus", "+375"),
    Country::new("Belgium", "+32"),
    Country::new("Belize", "+501"),
    Country::new("Benin", "+229"),
    Country::new("Bhutan", "+975"),
    Country::new("Bolivia", "+591"),
    Country::new("Bosnia and Herzegovina", "+387"),
    Country::new("Botswana", "+267"),
    Country::new("Brazil", "+55"),
    Country::new("Brunei", "+673"),
    Country::new("Bulgaria", "+359"),
    Country::new("Burkina Faso", "+226"),
    Country::new("Burundi", "+257"),
    Country::new("Cambodia", "+855"),
    Country::new("Cameroon", "+237"),
    Country::new("Canada", "+1"),
    Country::new("Chad", "+235"),
    Country::new("Chile", "+56"),
    Country::new("China", "+86"),
    Country::new("Colombia", "+57"),
    Country::new("Congo", "+242"),
    Country::new("Costa Rica", "+506"),
    Country::new("Croatia", "+385"),
    Country::new("Cuba", "+53"),
    Country::new("Cyprus", "+357"),
    Country::new("Czech Republic", "+420"),
    Country::new("Denmark", "+45"),
    Country::new("Djibouti", "+253"),
    Country::new("Dominican Republic", "+1809"),
    Country::new("Ecuador", "+593"),
    Country::new("Egypt", "+20"),
    Country::new("El Salvador", "+503"),
    Country::new("Estonia", "+372"),
    Country::new("Eswatini", "+268"),
    Country::new("Ethiopia", "+251"),
    Country::new("Fiji", "+679"),
    Country::new("Finland", "+358"),
    Country::new("France", "+33"),
    Country::new("Gabon", "+241"),
    Country::new("Gambia", "+220"),
    Country::new("Georgia", "+995"),
    Country::new("Germany", "+49"),
    Country::new("Ghana", "+233"),
    Country::new("Greece", "+30"),
    Country::new("Guatemala", "+502"),
    Country::new("Honduras", "+504"),
    Country::new("Hong Kong", "+852"),
    Country::new("Hungary", "+36"),
    Country::new("Iceland", "+354"),
    Country::new("India", "+91"),
    Country::new("Indonesia", "+62"),
    Country::new("Iran", "+98"),
    Country::new("Iraq", "+964"),
    Country::new("Ireland", "+353"),
    Country::new("Israel", "+972"),
    Country::new("Italy", "+39"),
    Country::new("Jamaica", "+1876"),
    Country::new("Japan", "+81"),
    Country::new("Jordan", "+962"),
    Country::new("Kazakhstan", "+7"),
    Country::new("Kenya", "+254"),
    Country::new("Kuwait", "+965"),
    Country::new("Kyrgyzstan", "+996"),
    Country::new("Laos", "+856"),
    Country::new("Latvia", "+371"),
    Country::new("Lebanon", "+961"),
    Country::new("Lesotho", "+266"),
    Country::new("Liberia", "+231"),
    Country::new("Libya", "+218"),
    Country::new("Lithuania", "+370"),
    Country::new("Luxembourg", "+352"),
    Country::new("Macau", "+853"),
    Country::new("Madagascar", "+261"),
    Country::new("Malawi", "+265"),
    Country::new("Malaysia", "+60"),
    Country::new("Maldives", "+960"),
    Country::new("Mali", "+223"),
    Country::new("Malta", "+356"),
    Country::new("Mauritania", "+222"),
    Country::new("Mauritius", "+230"),
    Country::new("Mexico", "+52"),
    Country::new("Moldova", "+373"),
    Country::new("Monaco", "+377"),
    Country::new("Mongolia", "+976"),
    Country::new("Montenegro", "+382"),
    Country::new("Morocco", "+212"),
    Country::new("Mozambique", "+258"),
    Country::new("Myanmar", "+95"),
    Country::new("Namibia", "+264"),
    Country::new("Nepal", "+977"),
    Country::new("Netherlands", "+31"),
    Country::new("New Zealand", "+64"),
    Country::new("Nicaragua", "+505"),
    Country::new("Niger", "+227"),
    Country::new("Nigeria", "+234"),
    Country::new("North Korea", "+850"),
    Country::new("North Macedonia", "+389"),
    Country::new("Norway", "+47"),
    Country::new("Oman", "+968"),
    Country::new("Pakistan", "+92"),
    Country::new("Panama", "+507"),
    Country::new("Papua New Guinea", "+675"),
    Country::new("Paraguay", "+595"),
    Country::new("Peru", "+51"),
    Country::new("Philippines", "+63"),
    Country::new("Poland", "+48"),
    Country::new("Portugal", "+351"),
    Country::new("Qatar", "+974"),
    Country::new("Romania", "+40"),
    Country::new("Russia", "+7"),
    Country::new("Rwanda", "+250"),
    Country::new("Saudi Arabia", "+966"),
    Country::new("Senegal", "+221"),
    Country::new("Serbia", "+381"),
    Country::new("Singapore", "+65"),
    Country::new("Slovakia", "+421"),
    Country::new("Slovenia", "+386"),
    Country::new("Somalia", "+252"),
    Country::new("South Africa", "+27"),
    Country::new("South Korea", "+82"),
    Country::new("Spain", "+34"),
    Country::new("Sri Lanka", "+94"),
    Country::new("Sudan", "+249"),
    Country::new("Sweden", "+46"),
    Country::new("Switzerland", "+41"),
    Country::new("Syria", "+963"),
    Country::new("Taiwan", "+886"),
    Country::new("Tajikistan", "+992"),
    Country::new("Tanzania", "+255"),
    Country::new("Thailand", "+66"),
    Country::new("Tunisia", "+216"),
    Country::new("Turkey", "+90"),
    Country::new("Uganda", "+256"),
    Country::new("Ukraine", "+380"),
    Country::new("United Arab Emirates", "+971"),
    Country::new("United Kingdom", "+44"),
    Country::new("United States", "+1"),
    Country::new("Uruguay", "+598"),
    Country::new("Uzbekistan", "+998"),
    Country::new("Venezuela", "+58"),
    Country::new("Vietnam", "+84"),
    Country::new("Yemen", "+967"),
    Country::new("Zambia", "+260"),
    Country::new("Zimbabwe", "+263"),
];

/// Look up a country by name or dial code.
///
/// Names are compared case-insensitively. Dial codes may be given with or
/// without the leading `+`. When several countries share a dial code the
/// first in [`COUNTRIES`] order is returned.
#[must_use]
pub fn find_country(query: &str) -> Option<&'static Country> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    if let Some(country) = COUNTRIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(query))
    {
        return Some(country);
    }

    let digits = query.strip_prefix('+').unwrap_or(query);
    COUNTRIES
        .iter()
        .find(|c| c.dial_code.strip_prefix('+') == Some(digits))
}

/// Countries whose name or dial code contains `filter` (case-insensitive).
#[must_use]
pub fn filter_countries(filter: &str) -> Vec<&'static Country> {
    let needle = filter.trim().to_lowercase();
    COUNTRIES
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle) || c.dial_code.contains(&needle))
        .collect()
}

/// Join a dial code and a local number into a full phone number.
///
/// Spaces, dashes and parentheses are stripped from the local part. The
/// result is not validated.
#[must_use]
pub fn compose_phone(dial_code: &str, local: &str) -> String {
    let local: String = local
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect();
    format!("{dial_code}{local}")
}

/// The trailing local number of a full phone number.
///
/// Returns the whole string when it is shorter than a local number.
#[must_use]
pub fn local_number(phone: &str) -> &str {
    let count = phone.chars().count();
    if count <= LOCAL_NUMBER_DIGITS {
        return phone;
    }
    let start = phone
        .char_indices()
        .nth(count - LOCAL_NUMBER_DIGITS)
        .map_or(0, |(idx, _)| idx);
    &phone[start..]
}
