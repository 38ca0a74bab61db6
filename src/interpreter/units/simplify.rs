use std::{iter::Peekable, str::Chars};

use crate::interpreter::units::registry::{Signature, display_class, lookup};

/// Net exponent per unit symbol, in first-appearance order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnitTerms(Vec<(String, i32)>);

impl UnitTerms {
    fn single(symbol: String, exponent: i32) -> Self {
        Self(vec![(symbol, exponent)])
    }

    /// Adds `sign * other` to the exponents.
    ///
    /// `None` when an exponent leaves the range where it can also be negated.
    fn merge(&mut self, other: Self, sign: i32) -> Option<()> {
        for (symbol, exponent) in other.0 {
            let delta = exponent.checked_mul(sign)?;
            if let Some(entry) = self.0.iter_mut().find(|(s, _)| *s == symbol) {
                entry.1 = negatable(entry.1.checked_add(delta)?)?;
            } else {
                self.0.push((symbol, negatable(delta)?));
            }
        }
        Some(())
    }

    /// Multiplies every exponent by `factor`, with the same range rule as
    /// [`UnitTerms::merge`].
    fn scale(&mut self, factor: i32) -> Option<()> {
        for (_, exponent) in &mut self.0 {
            *exponent = negatable(exponent.checked_mul(factor)?)?;
        }
        Some(())
    }

    /// Iterates over the symbols with a non-zero net exponent.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().filter(|(_, e)| *e != 0).map(|(s, e)| (s.as_str(), *e))
    }
}

/// Denominator terms are printed with their exponent negated, so `i32::MIN`
/// is out of range.
fn negatable(exponent: i32) -> Option<i32> {
    exponent.checked_neg().map(|_| exponent)
}

/// How atoms are read while parsing a unit expression.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Expand composites and read `in3` as `in^3`.
    Normalize,
    /// Keep registered symbols such as `in3` and `ksi` intact so their own
    /// conversion factors apply.
    Analyze,
}

/// Recursive-descent reader for unit strings.
///
/// ```text
/// expr    := product (("/" | "*") product)*
/// product := factor ("-" factor)*
/// factor  := atom ("^" integer)?
/// atom    := "(" expr ")" | "1" | letters digits?
/// ```
///
/// A hyphen joins terms tighter than `/`, which is what makes printed units
/// such as `kip/in-s` read back as `kip/(in*s)`.
struct UnitReader<'a> {
    chars: Peekable<Chars<'a>>,
    mode:  Mode,
}

impl<'a> UnitReader<'a> {
    fn new(text: &'a str, mode: Mode) -> Self {
        Self { chars: text.chars().peekable(),
               mode }
    }

    fn peek(&mut self) -> Option<char> {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
        self.chars.peek().copied()
    }

    fn parse(mut self) -> Option<UnitTerms> {
        let terms = self.expr()?;
        if self.peek().is_some() {
            return None;
        }
        Some(terms)
    }

    fn expr(&mut self) -> Option<UnitTerms> {
        let mut terms = self.product()?;
        loop {
            match self.peek() {
                Some('/') => {
                    self.chars.next();
                    let rhs = self.product()?;
                    terms.merge(rhs, -1)?;
                },
                Some('*') => {
                    self.chars.next();
                    let rhs = self.product()?;
                    terms.merge(rhs, 1)?;
                },
                _ => return Some(terms),
            }
        }
    }

    fn product(&mut self) -> Option<UnitTerms> {
        let mut terms = self.factor()?;
        while self.peek() == Some('-') {
            self.chars.next();
            let rhs = self.factor()?;
            terms.merge(rhs, 1)?;
        }
        Some(terms)
    }

    fn factor(&mut self) -> Option<UnitTerms> {
        let mut terms = self.atom()?;
        if self.peek() == Some('^') {
            self.chars.next();
            terms.scale(self.integer()?)?;
        }
        Some(terms)
    }

    fn atom(&mut self) -> Option<UnitTerms> {
        match self.peek()? {
            '(' => {
                self.chars.next();
                let inner = self.expr()?;
                if self.peek() != Some(')') {
                    return None;
                }
                self.chars.next();
                Some(inner)
            },
            '1' => {
                self.chars.next();
                Some(UnitTerms::default())
            },
            c if c.is_alphabetic() => {
                let letters = self.take_while(char::is_alphabetic);
                let digits = self.take_while(|c| c.is_ascii_digit());
                self.symbol(letters, &digits)
            },
            _ => None,
        }
    }

    fn symbol(&self, letters: String, digits: &str) -> Option<UnitTerms> {
        if self.mode == Mode::Analyze {
            let full = format!("{letters}{digits}");
            if lookup(&full).is_some() {
                return Some(UnitTerms::single(full, 1));
            }
        }

        let exponent = if digits.is_empty() { 1 } else { digits.parse().ok()? };

        if self.mode == Mode::Normalize
           && let Some(composite) = lookup(&letters).and_then(|def| def.composite)
        {
            let mut terms = UnitReader::new(composite, Mode::Normalize).parse()?;
            terms.scale(exponent)?;
            return Some(terms);
        }

        Some(UnitTerms::single(letters, exponent))
    }

    fn integer(&mut self) -> Option<i32> {
        let negative = if self.peek() == Some('-') {
            self.chars.next();
            true
        } else {
            false
        };
        let digits = self.take_while(|c| c.is_ascii_digit());
        let value: i32 = digits.parse().ok()?;
        Some(if negative { -value } else { value })
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.chars.next_if(|c| pred(*c)) {
            out.push(c);
        }
        out
    }
}

/// Simplifies a compound unit expression.
///
/// Composite units are expanded (`ksi` becomes `kip/in^2`), numeric suffixes
/// become exponents (`in3` becomes `in^3`), equal symbols are combined, and
/// the result is printed with force units first, then lengths, then the rest.
/// Numerator and denominator terms are joined by `-`.
///
/// Strings that are not unit expressions are returned unchanged, so the
/// function is idempotent for every input.
///
/// # Parameters
/// - `unit`: The unit text, possibly empty.
///
/// # Returns
/// The normalized unit, or an empty string when everything cancels.
///
/// # Example
/// ```
/// use madola::interpreter::units::simplify::simplify_unit;
///
/// assert_eq!(simplify_unit("ksi*in3"), "kip-in");
/// assert_eq!(simplify_unit("m*m"), "m^2");
/// assert_eq!(simplify_unit("m/m"), "");
/// assert_eq!(simplify_unit("in*kip/s^2"), "kip-in/s^2");
/// ```
#[must_use]
pub fn simplify_unit(unit: &str) -> String {
    if unit.trim().is_empty() {
        return String::new();
    }
    UnitReader::new(unit, Mode::Normalize).parse()
                                          .map_or_else(|| unit.to_string(), |terms| render(&terms))
}

/// Raises a unit to an integer power and simplifies the result.
///
/// Text that is not a unit expression is wrapped as `(unit)^exponent`.
///
/// # Returns
/// `None` when a resulting exponent does not fit in an `i32`.
///
/// # Example
/// ```
/// use madola::interpreter::units::simplify::power_unit;
///
/// assert_eq!(power_unit("m/s", 2).as_deref(), Some("m^2/s^2"));
/// assert_eq!(power_unit("m", 0).as_deref(), Some(""));
/// assert_eq!(power_unit("s", -1).as_deref(), Some("1/s"));
/// assert_eq!(power_unit("m^2", i32::MAX), None);
/// ```
#[must_use]
pub fn power_unit(unit: &str, exponent: i32) -> Option<String> {
    if unit.trim().is_empty() || exponent == 0 {
        return Some(String::new());
    }
    match UnitReader::new(unit, Mode::Normalize).parse() {
        Some(mut terms) => {
            terms.scale(exponent)?;
            Some(render(&terms))
        },
        None => Some(format!("({unit})^{exponent}")),
    }
}

/// Computes the dimension signature and conversion factor of a unit.
///
/// Returns `None` when any symbol is not registered or the signature does
/// not fit in `i32`.
#[must_use]
pub fn analyze(unit: &str) -> Option<(Signature, f64)> {
    let terms = UnitReader::new(unit, Mode::Analyze).parse()?;
    let mut signature: Signature = [0; 4];
    let mut factor = 1.0;

    for (symbol, exponent) in terms.iter() {
        let def = lookup(symbol)?;
        for (slot, base) in signature.iter_mut().zip(def.dimension.signature()) {
            *slot = slot.checked_add(base.checked_mul(exponent)?)?;
        }
        factor *= def.conversion_factor.powi(exponent);
    }

    Some((signature, factor))
}

fn render(terms: &UnitTerms) -> String {
    let mut numerator: Vec<(&str, i32)> = terms.iter().filter(|(_, e)| *e > 0).collect();
    let mut denominator: Vec<(&str, i32)> =
        terms.iter().filter(|(_, e)| *e < 0).map(|(s, e)| (s, -e)).collect();

    numerator.sort_by_key(|(s, _)| display_class(s));
    denominator.sort_by_key(|(s, _)| display_class(s));

    let join = |side: &[(&str, i32)]| {
        side.iter()
            .map(|(s, e)| if *e == 1 { (*s).to_string() } else { format!("{s}^{e}") })
            .collect::<Vec<_>>()
            .join("-")
    };

    match (numerator.is_empty(), denominator.is_empty()) {
        (true, true) => String::new(),
        (false, true) => join(&numerator),
        (true, false) => format!("1/{}", join(&denominator)),
        (false, false) => format!("{}/{}", join(&numerator), join(&denominator)),
    }
}
