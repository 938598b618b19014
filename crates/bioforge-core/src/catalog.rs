//! Design Catalog - static contaminant → enzyme design table
//!
//! Every contaminant class maps to exactly one entry, so lookup is total
//! for any validated [`SampleDescriptor`](crate::SampleDescriptor).

use serde::Serialize;

use crate::sample::ContaminantClass;

/// Known-good starting point for a remediation design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub contaminant: ContaminantClass,
    pub organism: &'static str,
    pub organism_description: &'static str,
    pub enzyme: &'static str,
    /// Beneficial mutations, most impactful first
    pub mutations: &'static [&'static str],
    pub references: &'static [&'static str],
}

static PET_ENTRY: CatalogEntry = CatalogEntry {
    contaminant: ContaminantClass::Pet,
    organism: "Ideonella sakaiensis",
    organism_description: "Gram-negative bacterium that uses PET as its major carbon source",
    enzyme: "PETase",
    mutations: &["S121E", "D186H", "R224Q", "N233K", "R280A"],
    references: &[
        "Yoshida S. et al. (2016) A bacterium that degrades and assimilates poly(ethylene terephthalate). Science 351:1196-1199",
        "Lu H. et al. (2022) Machine learning-aided engineering of hydrolases for PET depolymerization. Nature 604:662-667",
    ],
};

static PE_ENTRY: CatalogEntry = CatalogEntry {
    contaminant: ContaminantClass::Pe,
    organism: "Rhodococcus ruber",
    organism_description: "Actinomycete forming biofilms on polyethylene surfaces",
    enzyme: "Alkane hydroxylase (AlkB)",
    mutations: &["W55L", "L132V"],
    references: &[
        "Yang J. et al. (2014) Evidence of polyethylene biodegradation by bacterial strains from the guts of plastic-eating waxworms. Environ. Sci. Technol. 48:13776-13784",
    ],
};

static PP_ENTRY: CatalogEntry = CatalogEntry {
    contaminant: ContaminantClass::Pp,
    organism: "Bacillus cereus",
    organism_description: "Spore-forming soil bacterium isolated from mangrove sediment",
    enzyme: "Laccase (CotA)",
    mutations: &["D206N", "L386W", "G417L"],
    references: &[
        "Auta H.S. et al. (2018) Growth kinetics and biodeterioration of polypropylene microplastics by Bacillus sp. and Rhodococcus sp. Environ. Pollut. 231:1552-1559",
    ],
};

static PS_ENTRY: CatalogEntry = CatalogEntry {
    contaminant: ContaminantClass::Ps,
    organism: "Exiguobacterium sp. YT2",
    organism_description: "Gut bacterium of mealworms able to depolymerize polystyrene",
    enzyme: "Styrene monooxygenase (StyA)",
    mutations: &["A227V"],
    references: &[
        "Yang Y. et al. (2015) Biodegradation and mineralization of polystyrene by plastic-eating mealworms. Environ. Sci. Technol. 49:12080-12086",
    ],
};

static PVC_ENTRY: CatalogEntry = CatalogEntry {
    contaminant: ContaminantClass::Pvc,
    organism: "Pseudomonas citronellolis",
    organism_description: "Biofilm-forming bacterium that attacks plasticised PVC films",
    enzyme: "Catalase-peroxidase (KatG)",
    mutations: &["T152S", "E241K"],
    references: &[
        "Giacomucci L. et al. (2019) Polyvinyl chloride biodegradation by Pseudomonas citronellolis and Bacillus flexus. New Biotechnol. 52:35-41",
    ],
};

static PU_ENTRY: CatalogEntry = CatalogEntry {
    contaminant: ContaminantClass::Pu,
    organism: "Pseudomonas protegens",
    organism_description: "Rhizosphere bacterium secreting polyester-polyurethane hydrolases",
    enzyme: "Polyurethanase (PueA)",
    mutations: &["S199A", "H358Q", "F140L", "V96I"],
    references: &[
        "Howard G.T. (2002) Biodegradation of polyurethane: a review. Int. Biodeterior. Biodegrad. 49:245-252",
    ],
};

/// Static, read-only design catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct DesignCatalog;

impl DesignCatalog {
    /// Look up the entry for a contaminant class
    pub fn lookup(contaminant: ContaminantClass) -> &'static CatalogEntry {
        match contaminant {
            ContaminantClass::Pet => &PET_ENTRY,
            ContaminantClass::Pe => &PE_ENTRY,
            ContaminantClass::Pp => &PP_ENTRY,
            ContaminantClass::Ps => &PS_ENTRY,
            ContaminantClass::Pvc => &PVC_ENTRY,
            ContaminantClass::Pu => &PU_ENTRY,
        }
    }

    /// Iterate every entry in contaminant order
    pub fn entries() -> impl Iterator<Item = &'static CatalogEntry> {
        ContaminantClass::ALL.into_iter().map(Self::lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_total() {
        for class in ContaminantClass::ALL {
            let entry = DesignCatalog::lookup(class);
            assert_eq!(entry.contaminant, class);
            assert!(!entry.enzyme.is_empty());
            assert!(!entry.mutations.is_empty());
            assert!(!entry.references.is_empty());
        }
    }

    #[test]
    fn test_pet_entry() {
        let entry = DesignCatalog::lookup(ContaminantClass::Pet);
        assert_eq!(entry.organism, "Ideonella sakaiensis");
        assert_eq!(entry.enzyme, "PETase");
        assert!(entry.mutations.len() >= 3);
    }

    #[test]
    fn test_entries_cover_all_classes() {
        assert_eq!(DesignCatalog::entries().count(), 6);
    }
}
