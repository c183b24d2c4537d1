//! Writes a synthetic `metadata.csv` for trying the explorer without the real
//! dataset: sparse columns, untitled rows, unparseable dates and a source column.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const JOURNALS: &[&str] = &[
    "BMJ",
    "The Lancet",
    "PLoS One",
    "Virology",
    "Nature",
    "J Virol",
    "Emerg Infect Dis",
];
const SOURCES: &[&str] = &["PMC", "Medline", "WHO", "Elsevier", "MedRxiv"];
const SURNAMES: &[&str] = &["Smith", "Chen", "Garcia", "Müller", "Okafor", "Tanaka", "Rossi"];
const TITLE_WORDS: &[&str] = &[
    "viral", "transmission", "respiratory", "infection", "clinical", "patients", "vaccine",
    "outbreak", "severe", "analysis", "coronavirus", "covid", "pneumonia", "immune", "response",
];
const ABSTRACT_WORDS: &[&str] = &[
    "we", "report", "a", "cohort", "of", "patients", "with", "acute", "symptoms", "results",
    "suggest", "that", "early", "treatment", "reduces", "mortality",
];

fn sentence(rng: &mut SimpleRng, words: &[&str], len: usize) -> String {
    (0..len).map(|_| rng.pick(words)).collect::<Vec<_>>().join(" ")
}

fn publish_time(rng: &mut SimpleRng) -> String {
    let year = 2003 + (rng.next_u64() % 20) as i32;
    let month = 1 + rng.next_u64() % 12;
    let day = 1 + rng.next_u64() % 28;
    match rng.next_u64() % 10 {
        0 => year.to_string(),
        1 => "unknown".to_string(),
        2 => String::new(),
        _ => format!("{year}-{month:02}-{day:02}"),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = 500;

    let output_path = "metadata.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record([
        "cord_uid",
        "source_x",
        "title",
        "doi",
        "abstract",
        "publish_time",
        "authors",
        "journal",
        "mag_id",
        "arxiv_id",
    ])?;

    for i in 0..rows {
        let cord_uid = format!("{:08x}", rng.next_u64() as u32);
        let title = if rng.chance(0.03) {
            String::new()
        } else {
            let len = 3 + (rng.next_u64() % 6) as usize;
            let mut title = sentence(&mut rng, TITLE_WORDS, len);
            if let Some(first) = title.get_mut(..1) {
                first.make_ascii_uppercase();
            }
            title
        };
        let abstract_text = if rng.chance(0.2) {
            String::new()
        } else {
            let len = 20 + (rng.next_u64() % 180) as usize;
            sentence(&mut rng, ABSTRACT_WORDS, len)
        };
        let authors = format!("{}, A.; {}, B.", rng.pick(SURNAMES), rng.pick(SURNAMES));
        let journal = if rng.chance(0.1) { "" } else { rng.pick(JOURNALS) };
        let doi = format!("10.1000/{i}");
        // Too sparse to survive cleaning.
        let arxiv_id = if rng.chance(0.05) {
            format!("2004.{:05}", rng.next_u64() % 100_000)
        } else {
            String::new()
        };

        let source = rng.pick(SOURCES);
        let published = publish_time(&mut rng);
        writer.write_record([
            cord_uid.as_str(),
            source,
            title.as_str(),
            doi.as_str(),
            abstract_text.as_str(),
            published.as_str(),
            authors.as_str(),
            journal,
            "",
            arxiv_id.as_str(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {rows} papers to {output_path}");
    Ok(())
}
