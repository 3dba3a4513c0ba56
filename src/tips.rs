use rand::Rng;

pub const HEALTH_TIPS: [&str; 7] = [
    "Hidrasi: Minum minimal 8 gelas air per hari untuk menjaga kesehatan reproduksi.",
    "Olahraga: 30 menit aktivitas fisik dapat mengurangi risiko kista ovarium.",
    "Nutrisi: Konsumsi sayuran hijau dan buah-buahan kaya antioksidan.",
    "Istirahat Cukup: Pastikan tidur 7-8 jam setiap malam untuk keseimbangan hormon.",
    "Manajemen Stres: Lakukan meditasi atau yoga untuk mengurangi tingkat stres.",
    "Pemeriksaan Rutin: Jangan lewatkan jadwal pemeriksaan kesehatan tahunan Anda.",
    "Hindari Rokok & Alkohol: Batasi atau hindari konsumsi zat-zat berbahaya ini.",
];

/// Uniform pick; independent per call.
pub fn random_tip<R: Rng>(rng: &mut R) -> &'static str {
    HEALTH_TIPS[rng.gen_range(0..HEALTH_TIPS.len())]
}
