//! Static ticker registry: symbol → (provider id, URL slug).
//!
//! The table mirrors the provider's pair ids for the covered universe
//! (Chilean exchange plus a few US names). Adding coverage means adding
//! a row here, nothing else.

use analysis_core::{AnalysisError, AnalysisResult, TickerMeta};

const TICKERS: &[(&str, &str, &str)] = &[
    ("AAPL", "6408", "apple-computer-inc"),
    ("ENELCHILE", "976489", "enersis-chile-sa"),
    ("ENELAM", "41445", "enersis"),
    ("SMU", "1055339", "smu"),
    ("MASISA", "41468", "masisa"),
    ("HABITAT", "41452", "a.f.p.-habitat"),
    ("ILC", "41458", "inv-la-constru"),
    ("AAISA", "1193024", "administradora-americana-de-invers"),
    ("CONCHATORO", "41427", "vina-concha-to"),
    ("SOQUICOM", "41485", "soquicom"),
    ("CCU", "41417", "cervecerias-un"),
    ("CLOROX", "7933", "clorox-co"),
    ("EMBONORB", "41443", "embonor-b"),
    ("LIPIGAS", "996053", "empresas-lipigas-sa"),
    ("NUEVAPOLAR", "41462", "nuevapolar"),
    ("QUINENCO", "41481", "quinenco"),
    ("PROVIDA", "41480", "a.f.p.-provida"),
    ("ZOFRI", "41500", "zofri"),
    ("ANDINA-A", "41403", "emb-andina-a"),
    ("AESANDES", "41407", "aesgener"),
    ("AGUASA", "41402", "aguas-andinas"),
    ("BANCOCHILE", "41422", "banco-de-chile-(sn)"),
    ("BCI", "41412", "bci-(sn)"),
    ("CAP", "41415", "cap"),
    ("CENCOSUD", "41419", "cencosud"),
    ("CENCOSHOPP", "1152242", "cencosud-shopping-sa"),
    ("COLBUN", "41432", "colbun"),
    ("ANDINA-B", "41404", "emb-andina-b"),
    ("BSANTANDER", "41493", "santander-chil"),
    ("CMPC", "41416", "cmpc"),
    ("COPEC", "41434", "empresas-copec"),
    ("FALABELLA", "41449", "falabella"),
    ("IAM", "41455", "iam-sa"),
    ("OROBLANCO", "41471", "oro-blanco"),
    ("RIPLEY", "41482", "ripley-corp"),
    ("SECURITY", "41487", "grupo-security"),
    ("SONDA", "41489", "sonda"),
    ("SQM-B", "41491", "soquimich-b"),
];

/// Resolve a symbol to its provider coordinates.
pub fn lookup(symbol: &str) -> AnalysisResult<TickerMeta> {
    TICKERS
        .iter()
        .find(|(sym, _, _)| *sym == symbol)
        .map(|(sym, id, slug)| TickerMeta {
            symbol: (*sym).to_string(),
            provider_id: (*id).to_string(),
            slug: (*slug).to_string(),
        })
        .ok_or_else(|| AnalysisError::UnknownTicker(symbol.to_string()))
}

/// All registered symbols, in table order.
pub fn symbols() -> impl Iterator<Item = &'static str> {
    TICKERS.iter().map(|(sym, _, _)| *sym)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_symbol() {
        let meta = lookup("SQM-B").unwrap();
        assert_eq!(meta.provider_id, "41491");
        assert_eq!(meta.slug, "soquimich-b");
    }

    #[test]
    fn test_lookup_unknown_symbol() {
        let err = lookup("NOPE").unwrap_err();
        match err {
            AnalysisError::UnknownTicker(sym) => assert_eq!(sym, "NOPE"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_registry_size() {
        assert_eq!(symbols().count(), 38);
    }
}
