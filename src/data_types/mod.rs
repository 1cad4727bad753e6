
/// Contains the clause and rule-row types
pub mod clause;
/// Reader/writer for the G2P rule table
pub mod g2p_table;
/// Contains the impact severity ranking
pub mod impact;
/// Contains the serializable summary of a matching run
pub mod match_report;
/// Contains the region parser
pub mod region;
/// Contains the VCF record wrapper and genotype decoding
pub mod variant_record;
