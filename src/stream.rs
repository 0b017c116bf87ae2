//! Simulated genomic data stream shown in the explorer's terminal column.

use crate::species::EducationalLevel;
use rand::Rng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const STREAM_CAPACITY: usize = 60;
pub const LINK_DURATION: Duration = Duration::from_millis(1500);
const FOCUSED_TICK: Duration = Duration::from_millis(250);
const GLOBAL_TICK: Duration = Duration::from_millis(500);

const FOCUS_TAGS: [&str; 9] = [
    "LOCUS_SYNC",
    "POLY_A_SIGNAL",
    "TATA_BOX_FOUND",
    "INTRON_SPLICING",
    "EXON_MATCH",
    "MADS_BOX_INIT",
    "RECOMB_SUPPRESS",
    "ENZYME_ENCODE",
    "HYDROPHOBIN_EXPR",
];

const GLOBAL_TAGS: [&str; 8] = [
    "SCAN_REFERENCE_GENOME",
    "ALIGNMENT_OK",
    "POL_II_SYNC",
    "TELOMERE_BOUND",
    "SNP_MAP_ACTIVE",
    "SCAFFOLD_VERIFIED",
    "KARYOTYPE_STABLE",
    "MITOCHONDRIAL_SYNC",
];

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StreamFocus {
    Global,
    Chromosome(u32),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum StreamPhase {
    Linking,
    Flowing,
}

/// Rolling feed of fake sequencer output. The stream holds six handshake
/// lines for 1.5 s after every (re)configuration, then appends one line per
/// tick, newest at the tail, oldest evicted at the head.
pub struct TerminalStream {
    species_ref: String,
    focus: StreamFocus,
    phase: StreamPhase,
    lines: VecDeque<String>,
    flow_starts_at: Instant,
    next_line_at: Instant,
}

impl TerminalStream {
    pub fn new(species_id: &str, focus: StreamFocus, now: Instant) -> Self {
        let mut stream = Self {
            species_ref: String::new(),
            focus,
            phase: StreamPhase::Linking,
            lines: VecDeque::new(),
            flow_starts_at: now,
            next_line_at: now,
        };
        stream.configure(species_id, focus, now);
        stream
    }

    /// Restarts the handshake against a new species or chromosome focus.
    pub fn configure(&mut self, species_id: &str, focus: StreamFocus, now: Instant) {
        self.species_ref = species_id.to_ascii_uppercase();
        self.focus = focus;
        self.phase = StreamPhase::Linking;
        self.flow_starts_at = now + LINK_DURATION;
        self.next_line_at = self.flow_starts_at;
        self.lines.clear();
        self.push_line(">> INITIALIZING DATA LINK...".to_string());
        self.push_line(">> TARGET: DOE JGI MYCOCOSM DATABASE".to_string());
        self.push_line(format!(">> ACCESSING REF: {}", self.species_ref));
        match focus {
            StreamFocus::Chromosome(id) => {
                self.push_line(format!(">> SYNCING CHR_{id} MAP..."));
                self.push_line(">> ACTION: ENGAGE [DEEP DIVE] FOR MOLECULAR ANALYSIS".to_string());
            }
            StreamFocus::Global => {
                self.push_line(">> GLOBAL ASSEMBLY SCAN...".to_string());
                self.push_line(">> STATUS: SCANNING TOTAL ARCHITECTURE".to_string());
            }
        }
        self.push_line(">> HANDSHAKE COMPLETE: DATA FLOWING".to_string());
    }

    /// Advances the stream to `now`, appending at most one flow line per
    /// call. Returns true when the display changed.
    pub fn tick(&mut self, now: Instant, rng: &mut impl Rng) -> bool {
        match self.phase {
            StreamPhase::Linking => {
                if now < self.flow_starts_at {
                    return false;
                }
                self.phase = StreamPhase::Flowing;
                let line = self.next_line(rng);
                self.push_line(line);
                self.next_line_at = now + self.tick_interval();
                true
            }
            StreamPhase::Flowing => {
                if now < self.next_line_at {
                    return false;
                }
                let line = self.next_line(rng);
                self.push_line(line);
                self.next_line_at = now + self.tick_interval();
                true
            }
        }
    }

    pub fn tick_interval(&self) -> Duration {
        match self.focus {
            StreamFocus::Chromosome(_) => FOCUSED_TICK,
            StreamFocus::Global => GLOBAL_TICK,
        }
    }

    pub fn focus(&self) -> StreamFocus {
        self.focus
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn status_line(&self) -> &'static str {
        match (self.phase, self.focus) {
            (StreamPhase::Linking, _) => "JGI_MYCOCOSM_LINKING...",
            (StreamPhase::Flowing, StreamFocus::Chromosome(_)) => "PROTOCOL: MOLECULAR_SEQ",
            (StreamPhase::Flowing, StreamFocus::Global) => "PROTOCOL: ASSEMBLY_SCAN",
        }
    }

    /// Left and right footer captions under the terminal readout.
    pub fn footer_status(&self, level: EducationalLevel) -> (&'static str, String) {
        let mode = match level {
            EducationalLevel::Beginner => "MAPPING LIFE BLUEPRINTS",
            _ => "SYNC: LOCKED / SEARCHING",
        };
        let target = match self.focus {
            StreamFocus::Chromosome(id) => format!("CHR_MAP_{id}"),
            StreamFocus::Global => "SYSTEM_IDLE".to_string(),
        };
        (mode, target)
    }

    fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > STREAM_CAPACITY {
            self.lines.pop_front();
        }
    }

    fn next_line(&mut self, rng: &mut impl Rng) -> String {
        match self.focus {
            StreamFocus::Chromosome(id) => {
                let roll: f64 = rng.random_range(0.0..1.0);
                if roll < 0.08 {
                    format!(
                        ">seq|{}|CHR_{id}_LOC_{}",
                        self.species_ref,
                        rng.random_range(0..1000)
                    )
                } else if roll < 0.6 {
                    format!("[{}]", FOCUS_TAGS[rng.random_range(0..FOCUS_TAGS.len())])
                } else {
                    (0..8).map(|_| BASES[rng.random_range(0..BASES.len())]).collect()
                }
            }
            StreamFocus::Global => {
                let roll: f64 = rng.random_range(0.0..1.0);
                if roll < 0.3 {
                    format!("[{}]", GLOBAL_TAGS[rng.random_range(0..GLOBAL_TAGS.len())])
                } else {
                    format!("ADDR_0x{:X}", rng.random_range(0..10000))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn focused_shape_ok(line: &str, species_ref: &str, chromosome: u32) -> bool {
        if let Some(rest) = line.strip_prefix(&format!(">seq|{species_ref}|CHR_{chromosome}_LOC_"))
        {
            return rest.parse::<u32>().map(|n| n < 1000).unwrap_or(false);
        }
        if let Some(tag) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            return FOCUS_TAGS.contains(&tag);
        }
        line.len() == 8 && line.chars().all(|c| BASES.contains(&c))
    }

    fn global_shape_ok(line: &str) -> bool {
        if let Some(tag) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            return GLOBAL_TAGS.contains(&tag);
        }
        if let Some(hex) = line.strip_prefix("ADDR_0x") {
            return u32::from_str_radix(hex, 16).map(|n| n < 10000).unwrap_or(false)
                && hex.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase());
        }
        false
    }

    #[test]
    fn test_handshake_precedes_flow() {
        let mut rng = StdRng::seed_from_u64(7);
        let start = Instant::now();
        let mut stream = TerminalStream::new("s-commune", StreamFocus::Chromosome(3), start);

        let lines: Vec<&str> = stream.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], ">> INITIALIZING DATA LINK...");
        assert_eq!(lines[2], ">> ACCESSING REF: S-COMMUNE");
        assert_eq!(lines[3], ">> SYNCING CHR_3 MAP...");
        assert_eq!(lines[5], ">> HANDSHAKE COMPLETE: DATA FLOWING");
        assert_eq!(stream.status_line(), "JGI_MYCOCOSM_LINKING...");

        assert!(!stream.tick(start + Duration::from_millis(400), &mut rng));
        assert_eq!(stream.lines().count(), 6);

        assert!(stream.tick(start + LINK_DURATION, &mut rng));
        assert_eq!(stream.status_line(), "PROTOCOL: MOLECULAR_SEQ");
        let last = stream.lines().last().unwrap().to_string();
        assert!(focused_shape_ok(&last, "S-COMMUNE", 3), "{last}");
    }

    #[test]
    fn test_focused_flow_shapes_and_capacity() {
        let mut rng = StdRng::seed_from_u64(41);
        let start = Instant::now();
        let mut stream = TerminalStream::new("c-cinerea", StreamFocus::Chromosome(10), start);

        let mut now = start + LINK_DURATION;
        for _ in 0..200 {
            stream.tick(now, &mut rng);
            assert!(stream.lines().count() <= STREAM_CAPACITY);
            now += stream.tick_interval();
        }
        assert_eq!(stream.lines().count(), STREAM_CAPACITY);
        // Handshake lines were evicted from the head long ago.
        assert!(!stream.lines().next().unwrap().starts_with(">>"));
        for line in stream.lines() {
            assert!(focused_shape_ok(line, "C-CINEREA", 10), "{line}");
        }
    }

    #[test]
    fn test_global_flow_shapes() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = Instant::now();
        let mut stream = TerminalStream::new("a-bisporus", StreamFocus::Global, start);
        assert_eq!(stream.tick_interval(), Duration::from_millis(500));

        let mut now = start + LINK_DURATION;
        for _ in 0..80 {
            stream.tick(now, &mut rng);
            now += stream.tick_interval();
        }
        assert_eq!(stream.status_line(), "PROTOCOL: ASSEMBLY_SCAN");
        for line in stream.lines().skip(6) {
            assert!(global_shape_ok(line), "{line}");
        }
    }

    #[test]
    fn test_reconfigure_restarts_handshake() {
        let mut rng = StdRng::seed_from_u64(11);
        let start = Instant::now();
        let mut stream = TerminalStream::new("s-commune", StreamFocus::Global, start);
        let mut now = start + LINK_DURATION;
        for _ in 0..10 {
            stream.tick(now, &mut rng);
            now += stream.tick_interval();
        }

        stream.configure("s-commune", StreamFocus::Chromosome(1), now);
        assert_eq!(stream.lines().count(), 6);
        assert_eq!(stream.status_line(), "JGI_MYCOCOSM_LINKING...");
        assert_eq!(stream.focus(), StreamFocus::Chromosome(1));
        assert!(!stream.tick(now + Duration::from_millis(100), &mut rng));
    }

    #[test]
    fn test_footer_captions() {
        let start = Instant::now();
        let focused = TerminalStream::new("s-commune", StreamFocus::Chromosome(5), start);
        let (mode, target) = focused.footer_status(EducationalLevel::Beginner);
        assert_eq!(mode, "MAPPING LIFE BLUEPRINTS");
        assert_eq!(target, "CHR_MAP_5");

        let global = TerminalStream::new("s-commune", StreamFocus::Global, start);
        let (mode, target) = global.footer_status(EducationalLevel::Advanced);
        assert_eq!(mode, "SYNC: LOCKED / SEARCHING");
        assert_eq!(target, "SYSTEM_IDLE");
    }
}
