use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("class index {index} is out of range for {len} labels")]
pub struct LabelError {
    pub index: usize,
    pub len: usize,
}

/// Bird species names indexed by the class index the model emits.
pub const LABELS: [&str; 200] = [
    "American_Crow",
    "American_Goldfinch",
    "American_Pipit",
    "American_Redstart",
    "Anna_Hummingbird",
    "Baltimore_Oriole",
    "Barn_Swallow",
    "Bay_breasted_Warbler",
    "Belted_Kingfisher",
    "Bewick_Wren",
    "Black_Tern",
    "Black_and_white_Warbler",
    "Black_billed_Cuckoo",
    "Black_footed_Albatross",
    "Black_throated_Sparrow",
    "Blue_Grosbeak",
    "Blue_Jay",
    "Blue_headed_Vireo",
    "Blue_winged_Warbler",
    "Boat_tailed_Grackle",
    "Bobolink",
    "Bohemian_Waxwing",
    "Bronzed_Cowbird",
    "Brown_Pelican",
    "Cactus_Wren",
    "California_Gull",
    "Canada_Warbler",
    "Cape_Glossy_Starling",
    "Cape_May_Warbler",
    "Carolina_Wren",
    "Caspian_Tern",
    "Cedar_Waxwing",
    "Cerulean_Warbler",
    "Chestnut_sided_Warbler",
    "Chipping_Sparrow",
    "Clark_Nutcracker",
    "Cliff_Swallow",
    "Common_Tern",
    "Common_Yellowthroat",
    "Dark_eyed_Junco",
    "Downy_Woodpecker",
    "Eared_Grebe",
    "Eastern_Towhee",
    "Elegant_Tern",
    "European_Goldfinch",
    "Evening_Grosbeak",
    "Fish_Crow",
    "Florida_Jay",
    "Forsters_Tern",
    "Fox_Sparrow",
    "Frigatebird",
    "Gadwall",
    "Geococcyx",
    "Grasshopper_Sparrow",
    "Great_Crested_Flycatcher",
    "Great_Grey_Shrike",
    "Green_Kingfisher",
    "Green_Violetear",
    "Green_tailed_Towhee",
    "Groove_billed_Ani",
    "Harris_Sparrow",
    "Heermann_Gull",
    "Henslow_Sparrow",
    "Herring_Gull",
    "Hooded_Merganser",
    "Hooded_Oriole",
    "Hooded_Warbler",
    "Horned_Grebe",
    "Horned_Lark",
    "Horned_Puffin",
    "House_Sparrow",
    "Indigo_Bunting",
    "Ivory_Gull",
    "Laysan_Albatross",
    "Least_Tern",
    "Loggerhead_Shrike",
    "Long_tailed_Jaeger",
    "Louisiana_Waterthrush",
    "Mallard",
    "Marsh_Wren",
    "Mockingbird",
    "Mourning_Warbler",
    "Myrtle_Warbler",
    "Nashville_Warbler",
    "Nighthawk",
    "Northern_Flicker",
    "Northern_Fulmar",
    "Northern_Waterthrush",
    "Olive_sided_Flycatcher",
    "Orange_crowned_Warbler",
    "Ovenbird",
    "Pacific_Loon",
    "Palm_Warbler",
    "Pelagic_Cormorant",
    "Pied_Kingfisher",
    "Pied_billed_Grebe",
    "Pileated_Woodpecker",
    "Pine_Grosbeak",
    "Pine_Warbler",
    "Pomarine_Jaeger",
    "Prairie_Warbler",
    "Prothonotary_Warbler",
    "Purple_Finch",
    "Red_bellied_Woodpecker",
    "Red_breasted_Merganser",
    "Red_eyed_Vireo",
    "Red_headed_Woodpecker",
    "Red_winged_Blackbird",
    "Ring_billed_Gull",
    "Ringed_Kingfisher",
    "Rock_Wren",
    "Rose_breasted_Grosbeak",
    "Ruby_throated_Hummingbird",
    "Rufous_Hummingbird",
    "Rusty_Blackbird",
    "Sage_Thrasher",
    "Savannah_Sparrow",
    "Sayornis",
    "Scarlet_Tanager",
    "Scissor_tailed_Flycatcher",
    "Scott_Oriole",
    "Seaside_Sparrow",
    "Shiny_Cowbird",
    "Song_Sparrow",
    "Summer_Tanager",
    "Tree_Sparrow",
    "Tree_Swallow",
    "Tropical_Kingbird",
    "Vermilion_Flycatcher",
    "Vesper_Sparrow",
    "Warbling_Vireo",
    "Western_Grebe",
    "Western_Gull",
    "Western_Meadowlark",
    "Western_Wood_Pewee",
    "White_breasted_Kingfisher",
    "White_breasted_Nuthatch",
    "White_crowned_Sparrow",
    "White_eyed_Vireo",
    "White_necked_Raven",
    "White_throated_Sparrow",
    "Wilson_Warbler",
    "Winter_Wren",
    "Yellow_Warbler",
    "Acadian_Flycatcher",
    "Bank_Swallow",
    "Black_throated_Blue_Warbler",
    "Brandt_Cormorant",
    "Brewer_Blackbird",
    "Brewer_Sparrow",
    "Brown_Creeper",
    "Brown_Thrasher",
    "Clay_colored_Sparrow",
    "Common_Raven",
    "Field_Sparrow",
    "Glaucous_winged_Gull",
    "Golden_winged_Warbler",
    "Gray_Catbird",
    "Gray_Kingbird",
    "Gray_crowned_Rosy_Finch",
    "House_Wren",
    "Kentucky_Warbler",
    "Le_Conte_Sparrow",
    "Least_Flycatcher",
    "Lincoln_Sparrow",
    "Magnolia_Warbler",
    "Nelson_Sharp_tailed_Sparrow",
    "Orchard_Oriole",
    "Philadelphia_Vireo",
    "Tennessee_Warbler",
    "Worm_eating_Warbler",
    "Yellow_bellied_Flycatcher",
    "Yellow_billed_Cuckoo",
    "Yellow_breasted_Chat",
    "Yellow_throated_Vireo",
    "Artic_Tern",
    "Lazuli_Bunting",
    "Painted_Bunting",
    "Pigeon_Guillemot",
    "Red_cockaded_Woodpecker",
    "Sooty_Albatross",
    "Cardinal",
    "Green_Jay",
    "Chuck_will_Widow",
    "Swainson_Warbler",
    "Yellow_headed_Blackbird",
    "Mangrove_Cuckoo",
    "Parakeet_Auklet",
    "Red_legged_Kittiwake",
    "Red_faced_Cormorant",
    "American_Three_toed_Woodpecker",
    "Baird_Sparrow",
    "Black_capped_Vireo",
    "Slaty_backed_Gull",
    "White_Pelican",
    "Whip_poor_Will",
    "Rhinoceros_Auklet",
    "Spotted_Catbird",
    "Crested_Auklet",
    "Least_Auklet",
];

pub fn lookup(index: usize) -> Result<&'static str, LabelError> {
    LABELS.get(index).copied().ok_or(LabelError {
        index,
        len: LABELS.len(),
    })
}

pub fn len() -> usize {
    LABELS.len()
}
