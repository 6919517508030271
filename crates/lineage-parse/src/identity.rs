//! Identity resolution: dedup, gender inference, surname inheritance
//!
//! Two mentions with the same normalized name and the same explicit birth
//! year (or both unknown) are the same individual; the first occurrence
//! allocates the session-scoped id, repeats reuse it — the same shape as an
//! interner. Differing explicit birth years never collapse, so "John Smith
//! (1901)" and "John Smith (1934)" stay distinct.

use std::collections::HashMap;

use lineage_model::{Gender, Individual, PersonId};

use crate::annotation::collapse_whitespace;
use crate::line::ParsedSegment;

/// Pluggable first-name → gender heuristic.
///
/// The built-in tables are a closed heuristic; callers with better data
/// (locale-specific tables, an external service snapshot) swap in their own
/// implementation without touching graph logic.
pub trait GenderLookup {
    fn infer(&self, first_name: &str) -> Gender;
}

/// Built-in lookup over two fixed given-name frequency tables.
///
/// A name present in both tables takes the side with the higher count; an
/// exact tie resolves male (the documented bias of this heuristic).
pub struct NameFrequencyTable {
    male: HashMap<&'static str, u32>,
    female: HashMap<&'static str, u32>,
}

// Counts are rough per-100k occurrence weights; only their relative order
// matters, and only for names that appear on both sides.
#[rustfmt::skip]
const MALE_NAMES: &[(&str, u32)] = &[
    ("james", 3318), ("john", 3271), ("robert", 3143), ("michael", 2629),
    ("william", 2451), ("david", 2363), ("richard", 1703), ("joseph", 1404),
    ("thomas", 1380), ("charles", 1232), ("christopher", 1035), ("daniel", 974),
    ("matthew", 816), ("anthony", 721), ("mark", 701), ("donald", 676),
    ("steven", 660), ("paul", 639), ("andrew", 625), ("joshua", 621),
    ("kenneth", 609), ("kevin", 554), ("brian", 543), ("george", 543),
    ("edward", 526), ("ronald", 525), ("timothy", 520), ("jason", 506),
    ("jeffrey", 484), ("ryan", 435), ("jacob", 429), ("gary", 424),
    ("nicholas", 418), ("eric", 415), ("jonathan", 389), ("stephen", 386),
    ("larry", 381), ("justin", 375), ("scott", 371), ("brandon", 363),
    ("benjamin", 341), ("samuel", 339), ("frank", 337), ("gregory", 330),
    ("raymond", 323), ("alexander", 307), ("patrick", 307), ("jack", 304),
    ("dennis", 297), ("jerry", 293), ("tyler", 282), ("aaron", 273),
    ("jose", 268), ("henry", 263), ("adam", 258), ("douglas", 254),
    ("nathan", 246), ("peter", 245), ("zachary", 240), ("kyle", 236),
    ("walter", 232), ("harold", 226), ("jeremy", 225), ("ethan", 221),
    ("carl", 218), ("keith", 216), ("roger", 214), ("gerald", 208),
    ("christian", 207), ("terry", 205), ("sean", 203), ("arthur", 201),
    ("austin", 200), ("noah", 198), ("lawrence", 195), ("jesse", 192),
    ("joe", 191), ("bryan", 190), ("billy", 188), ("jordan", 187),
    ("albert", 185), ("dylan", 182), ("bruce", 180), ("willie", 178),
    ("gabriel", 174), ("alan", 171), ("juan", 170), ("logan", 168),
    ("wayne", 167), ("ralph", 164), ("roy", 163), ("eugene", 160),
    ("randy", 159), ("vincent", 157), ("russell", 156), ("louis", 154),
    ("philip", 152), ("bobby", 150), ("johnny", 148), ("bradley", 146),
    ("kelly", 120), ("leslie", 90), ("marion", 85),
];

#[rustfmt::skip]
const FEMALE_NAMES: &[(&str, u32)] = &[
    ("mary", 2629), ("patricia", 1073), ("jennifer", 932), ("linda", 1035),
    ("elizabeth", 937), ("barbara", 980), ("susan", 795), ("jessica", 719),
    ("sarah", 629), ("karen", 667), ("nancy", 669), ("lisa", 704),
    ("margaret", 713), ("betty", 666), ("sandra", 629), ("ashley", 560),
    ("dorothy", 727), ("kimberly", 554), ("emily", 537), ("donna", 583),
    ("michelle", 562), ("carol", 626), ("amanda", 537), ("melissa", 530),
    ("deborah", 560), ("stephanie", 492), ("rebecca", 471), ("sharon", 522),
    ("laura", 451), ("cynthia", 469), ("kathleen", 474), ("amy", 451),
    ("shirley", 482), ("angela", 468), ("helen", 663), ("anna", 440),
    ("brenda", 455), ("pamela", 430), ("nicole", 417), ("emma", 401),
    ("samantha", 393), ("katherine", 388), ("christine", 402), ("debra", 401),
    ("rachel", 383), ("catherine", 373), ("carolyn", 400), ("janet", 404),
    ("ruth", 562), ("maria", 382), ("heather", 374), ("diane", 387),
    ("virginia", 433), ("julie", 369), ("joyce", 409), ("victoria", 342),
    ("olivia", 321), ("kelly", 345), ("christina", 346), ("lauren", 327),
    ("joan", 373), ("evelyn", 380), ("judith", 370), ("megan", 320),
    ("cheryl", 345), ("andrea", 327), ("hannah", 307), ("martha", 380),
    ("jacqueline", 311), ("frances", 382), ("gloria", 342), ("ann", 350),
    ("teresa", 324), ("kathryn", 316), ("sara", 303), ("janice", 327),
    ("jean", 366), ("alice", 390), ("madison", 268), ("doris", 361),
    ("abigail", 267), ("julia", 291), ("judy", 312), ("grace", 292),
    ("denise", 296), ("amber", 276), ("marilyn", 306), ("beverly", 307),
    ("danielle", 268), ("theresa", 279), ("sophia", 245), ("marie", 299),
    ("diana", 268), ("brittany", 250), ("natalie", 243), ("isabella", 230),
    ("charlotte", 242), ("rose", 265), ("alexis", 231), ("kayla", 231),
    ("jordan", 86), ("leslie", 130), ("marion", 110),
];

impl NameFrequencyTable {
    pub fn new() -> Self {
        Self {
            male: MALE_NAMES.iter().copied().collect(),
            female: FEMALE_NAMES.iter().copied().collect(),
        }
    }
}

impl Default for NameFrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl GenderLookup for NameFrequencyTable {
    fn infer(&self, first_name: &str) -> Gender {
        let key = first_name.to_lowercase();
        let m = self.male.get(key.as_str()).copied().unwrap_or(0);
        let f = self.female.get(key.as_str()).copied().unwrap_or(0);
        if m == 0 && f == 0 {
            Gender::Unknown
        } else if f > m {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

/// Generational suffixes that do not count as surnames.
const GENERATIONAL_SUFFIXES: &[&str] = &["jr", "sr", "ii", "iii", "iv", "v"];

fn is_generational_suffix(token: &str) -> bool {
    GENERATIONAL_SUFFIXES.contains(&token.trim_end_matches('.').to_lowercase().as_str())
}

/// Strip parenthesized nicknames and split the remaining words.
fn name_tokens(name: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    for word in name.split_whitespace() {
        let opens = word.matches('(').count();
        let closes = word.matches(')').count();
        if depth == 0 && opens == 0 {
            tokens.push(word);
        }
        depth = (depth + opens).saturating_sub(closes);
    }
    tokens
}

/// First token of the name, nicknames skipped.
pub fn first_name(name: &str) -> Option<&str> {
    name_tokens(name).first().copied()
}

/// Last non-suffix token when the name has more than one, nicknames skipped.
pub fn surname(name: &str) -> Option<&str> {
    let tokens = name_tokens(name);
    let mut last = tokens.len();
    while last > 1 && is_generational_suffix(tokens[last - 1]) {
        last -= 1;
    }
    if last >= 2 {
        Some(tokens[last - 1])
    } else {
        None
    }
}

/// A segment is first-name-only when it has one token, or two where the
/// second is a generational suffix (Jr, II, ...). Only such segments inherit
/// a surname.
pub fn is_first_name_only(name: &str) -> bool {
    let tokens = name_tokens(name);
    match tokens.len() {
        1 => true,
        2 => is_generational_suffix(tokens[1]),
        _ => false,
    }
}

/// Insert an inherited surname, keeping any generational suffix last:
/// "Timothy Jr." + "Brannigan" → "Timothy Brannigan Jr.".
pub fn apply_surname(name: &str, surname: &str) -> String {
    let trimmed = name.trim();
    if let Some((head, tail)) = trimmed.rsplit_once(' ') {
        if is_generational_suffix(tail) {
            return format!("{head} {surname} {tail}");
        }
    }
    format!("{trimmed} {surname}")
}

/// Pick the surname a child of this union inherits, or `None`.
///
/// Priority: known-male primary → primary surname; known-female primary →
/// partner surname; else the symmetric rule on the partner's gender; else the
/// surname the parent frame itself inherited (continuation across
/// first-name-only generations); else partner-then-primary fallback.
pub fn inherit_surname(
    primary_name: &str,
    primary_gender: Gender,
    partner: Option<(&str, Gender)>,
    frame_inherited: Option<&str>,
) -> Option<String> {
    let primary_surname = surname(primary_name);
    let partner_surname = partner.and_then(|(name, _)| surname(name));
    let partner_gender = partner.map(|(_, g)| g).unwrap_or(Gender::Unknown);

    match primary_gender {
        Gender::Male => {
            if let Some(s) = primary_surname {
                return Some(s.to_string());
            }
        }
        Gender::Female => {
            if let Some(s) = partner_surname {
                return Some(s.to_string());
            }
        }
        Gender::Unknown => match partner_gender {
            Gender::Male => {
                if let Some(s) = partner_surname {
                    return Some(s.to_string());
                }
            }
            Gender::Female => {
                if let Some(s) = primary_surname {
                    return Some(s.to_string());
                }
            }
            Gender::Unknown => {}
        },
    }

    frame_inherited
        .map(str::to_string)
        .or_else(|| partner_surname.map(str::to_string))
        .or_else(|| primary_surname.map(str::to_string))
}

/// Dedup key: lowercased, whitespace-collapsed, nickname-stripped name plus
/// the explicit birth year.
fn dedup_key(display_name: &str, birth_year: Option<i32>) -> (String, Option<i32>) {
    let normalized = collapse_whitespace(&name_tokens(display_name).join(" ")).to_lowercase();
    (normalized, birth_year)
}

/// Allocates ids and deduplicates individuals within one parse invocation.
pub struct IdentityResolver<'a> {
    lookup: &'a dyn GenderLookup,
    by_key: HashMap<(String, Option<i32>), PersonId>,
    individuals: Vec<Individual>,
    next_id: u32,
}

impl<'a> IdentityResolver<'a> {
    pub fn new(lookup: &'a dyn GenderLookup) -> Self {
        Self {
            lookup,
            by_key: HashMap::new(),
            individuals: Vec::new(),
            next_id: 0,
        }
    }

    /// Resolve a mention to an id, allocating on first occurrence. Repeat
    /// mentions may fill in a missing death year, never overwrite one.
    pub fn resolve(&mut self, seg: &ParsedSegment) -> PersonId {
        self.resolve_named(&seg.display_name, seg.birth_year, seg.death_year)
    }

    /// As [`resolve`](Self::resolve), with the display name overridden
    /// (surname inheritance amends child names before resolution).
    pub fn resolve_named(
        &mut self,
        display_name: &str,
        birth_year: Option<i32>,
        death_year: Option<i32>,
    ) -> PersonId {
        let key = dedup_key(display_name, birth_year);
        if let Some(&id) = self.by_key.get(&key) {
            let existing = &mut self.individuals[id.raw() as usize];
            if existing.death_year.is_none() {
                existing.death_year = death_year;
            }
            return id;
        }

        let id = PersonId::new(self.next_id);
        self.next_id += 1;
        let gender = first_name(display_name)
            .map(|n| self.lookup.infer(n))
            .unwrap_or(Gender::Unknown);
        self.individuals.push(Individual {
            temp_id: id,
            display_name: display_name.to_string(),
            birth_year,
            death_year,
            gender,
        });
        self.by_key.insert(key, id);
        id
    }

    pub fn gender_of(&self, id: PersonId) -> Gender {
        self.individuals[id.raw() as usize].gender
    }

    pub fn into_individuals(self) -> Vec<Individual> {
        self.individuals
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}
