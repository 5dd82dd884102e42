//! Static registry of emulated platforms and their ROM file conventions.
//!
//! Declaration order is load-bearing: alias substrings collide (a folder
//! named "Game Boy Color" also contains "Game Boy"), and detection returns
//! the first matching record.

use std::collections::HashMap;
use std::sync::LazyLock;

/// One emulated platform: its thumbnail-server id, the ROM file extensions
/// it accepts, the folder-name aliases it is detected by, and the platforms
/// whose listings are consulted when its own listing yields no match.
#[derive(Debug)]
pub struct PlatformRecord {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub aliases: &'static [&'static str],
    pub fallbacks: &'static [&'static str],
}

pub static PLATFORMS: &[PlatformRecord] = &[
    PlatformRecord {
        name: "Nintendo - Game Boy Color",
        extensions: &["gbc", "zip"],
        aliases: &["GBC", "Game Boy Color"],
        fallbacks: &["Nintendo - Game Boy"],
    },
    PlatformRecord {
        name: "Nintendo - Game Boy Advance",
        extensions: &["gba", "zip"],
        aliases: &["GBA", "Game Boy Advance"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Nintendo - Game Boy",
        extensions: &["gb", "sgb", "zip"],
        aliases: &["GB", "SGB", "Game Boy"],
        fallbacks: &["Nintendo - Game Boy Color"],
    },
    PlatformRecord {
        name: "Nintendo - Super Nintendo Entertainment System",
        extensions: &["sfc", "smc", "zip"],
        aliases: &["SNES", "SFC", "Super Famicom", "Super Nintendo", "Super NES"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Nintendo - Nintendo 64DD",
        extensions: &["n64dd", "zip"],
        aliases: &["N64DD", "Nintendo 64DD"],
        fallbacks: &["Nintendo - Nintendo 64"],
    },
    PlatformRecord {
        name: "Nintendo - Nintendo 64",
        extensions: &["n64", "v64", "zip"],
        aliases: &["N64", "Nintendo 64"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Nintendo - Family Computer Disk System",
        extensions: &["fds", "zip"],
        aliases: &["FDS", "Family Computer Disk System", "Famicom Disk System"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Nintendo - Nintendo Entertainment System",
        extensions: &["nes", "zip"],
        aliases: &["NES", "FC", "Famicom", "Nintendo"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Nintendo - Nintendo DSi",
        extensions: &["dsi", "zip"],
        aliases: &["DSi", "Nintendo DSi"],
        fallbacks: &["Nintendo - Nintendo DS"],
    },
    PlatformRecord {
        name: "Nintendo - Nintendo DS",
        extensions: &["nds", "zip"],
        aliases: &["DS", "Nintendo DS"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Nintendo - Pokemon Mini",
        extensions: &["pm", "zip"],
        aliases: &["PKM", "Pokemon Mini"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Nintendo - Virtual Boy",
        extensions: &["vb", "zip"],
        aliases: &["VB", "Virtual Boy"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Handheld Electronic Game",
        extensions: &["gw", "zip"],
        aliases: &["GW", "Game & Watch"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sega - 32X",
        extensions: &["32x", "zip"],
        aliases: &["32X", "THIRTYTWOX"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sega - Dreamcast",
        extensions: &["dc", "chd", "gdi", "m3u"],
        aliases: &["DC", "Dreamcast"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sega - Mega Drive - Genesis",
        extensions: &["md", "gen", "zip"],
        aliases: &["MD", "Mega Drive", "Genesis"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sega - Mega-CD - Sega CD",
        extensions: &["chd", "iso", "cue", "m3u"],
        aliases: &["Mega CD", "Sega CD", "MegaCD", "SegaCD"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sega - Game Gear",
        extensions: &["gg", "zip"],
        aliases: &["GG", "Game Gear"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sega - Master System - Mark III",
        extensions: &["sms", "zip"],
        aliases: &["SMS", "MS", "Master System", "Mark III"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sega - Saturn",
        extensions: &["chd", "cue"],
        aliases: &["Saturn"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sony - PlayStation Portable",
        extensions: &["iso", "cso", "chd", "m3u"],
        aliases: &["PSP", "PlayStation Portable"],
        fallbacks: &["Sony - PlayStation"],
    },
    PlatformRecord {
        name: "Sony - PlayStation",
        extensions: &["chd", "cue", "m3u"],
        aliases: &["PS", "PSX", "PS1", "PlayStation"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Amstrad - CPC",
        extensions: &["dsk", "zip"],
        aliases: &["CPC", "Amstrad"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Atari - 2600",
        extensions: &["a26", "zip"],
        aliases: &["A26", "2600", "Atari 2600"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Atari - 5200",
        extensions: &["a52", "zip"],
        aliases: &["A52", "5200", "Atari 5200"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Atari - 7800",
        extensions: &["a78", "zip"],
        aliases: &["A78", "7800", "Atari 7800"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Atari - Jaguar",
        extensions: &["jag", "zip"],
        aliases: &["JAG", "Jaguar"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Atari - Lynx",
        extensions: &["lynx", "zip"],
        aliases: &["LYNX", "Lynx"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Atari - ST",
        extensions: &["st", "zip"],
        aliases: &["ST", "Atari ST"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Bandai - WonderSwan Color",
        extensions: &["wsc", "zip"],
        aliases: &["WSC", "WonderSwan Color"],
        fallbacks: &["Bandai - WonderSwan"],
    },
    PlatformRecord {
        name: "Bandai - WonderSwan",
        extensions: &["ws", "zip"],
        aliases: &["WS", "WonderSwan"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Coleco - ColecoVision",
        extensions: &["col", "zip"],
        aliases: &["COL", "Coleco", "ColecoVision"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Commodore - Amiga",
        extensions: &["adf", "zip"],
        aliases: &["ADF", "Amiga"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Commodore - VIC-20",
        extensions: &["v64", "zip"],
        aliases: &["VIC"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Commodore - 64",
        extensions: &["d64", "zip"],
        aliases: &["D64", "C64", "Commodore 64", "Commodore"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "FBNeo - Arcade Games",
        extensions: &["zip"],
        aliases: &["FBN", "FBNeo", "FB Alpha", "FBA", "Final Burn Alpha"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "GCE - Vectrex",
        extensions: &["vec", "zip"],
        aliases: &["VEC", "Vectrex"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "GamePark - GP32",
        extensions: &["gp", "zip"],
        aliases: &["GP32", "GamePark"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "MAME",
        extensions: &["zip"],
        aliases: &["MAME"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Microsoft - MSX",
        extensions: &["rom", "zip"],
        aliases: &["MSX"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Mattel - Intellivision",
        extensions: &["int", "zip"],
        aliases: &["INT", "Intellivision"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "NEC - PC Engine CD - TurboGrafx-CD",
        extensions: &["chd", "cue", "m3u"],
        aliases: &["PCECD", "TGCD", "PC Engine CD", "TurboGrafx-CD"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "NEC - PC Engine SuperGrafx",
        extensions: &["sgx", "zip"],
        aliases: &["SGFX", "SGX", "SuperGrafx"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "NEC - PC Engine - TurboGrafx 16",
        extensions: &["pce", "zip"],
        aliases: &["PCE", "TG16", "PC Engine", "TurboGrafx 16"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "SNK - Neo Geo CD",
        extensions: &["chd", "cue", "m3u"],
        aliases: &["NEOCD", "NGCD", "Neo Geo CD"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "SNK - Neo Geo Pocket Color",
        extensions: &["ngc", "zip"],
        aliases: &["NGPC", "Neo Geo Pocket Color"],
        fallbacks: &["SNK - Neo Geo Pocket"],
    },
    PlatformRecord {
        name: "SNK - Neo Geo Pocket",
        extensions: &["ngp", "zip"],
        aliases: &["NGP", "Neo Geo Pocket"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "SNK - Neo Geo",
        extensions: &["neogeo", "zip"],
        aliases: &["NEOGEO", "Neo Geo"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Magnavox - Odyssey2",
        extensions: &["bin", "zip"],
        aliases: &["ODYSSEY"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "TIC-80",
        extensions: &["tic", "zip"],
        aliases: &["TIC"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Sharp - X68000",
        extensions: &["hdf", "zip"],
        aliases: &["X68000"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "Watara - Supervision",
        extensions: &["sv", "zip"],
        aliases: &["SV", "Supervision"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "DOS",
        extensions: &["pc", "dos", "zip"],
        aliases: &["DOS"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "DOOM",
        extensions: &["wad", "zip"],
        aliases: &["WAD"],
        fallbacks: &[],
    },
    PlatformRecord {
        name: "ScummVM",
        extensions: &["scummvm", "zip"],
        aliases: &["SCUMM"],
        fallbacks: &[],
    },
];

/// Index by platform id, built once on first use. `PLATFORMS` stays the
/// source of truth for iteration order.
static PLATFORM_INDEX: LazyLock<HashMap<&'static str, &'static PlatformRecord>> =
    LazyLock::new(|| PLATFORMS.iter().map(|record| (record.name, record)).collect());

/// Registry lookup by platform id.
pub fn platform(id: &str) -> Option<&'static PlatformRecord> {
    PLATFORM_INDEX.get(id).copied()
}

/// Detect the platform a file belongs to from its path.
///
/// A platform matches when the extension is in its accepted set (waived for
/// folders) and one of its aliases occurs in the first path segment — the
/// folder a ROM library normally sorts by. First declared match wins.
/// `None` means "not a ROM library file", not an error.
pub fn lookup_platform(file_path: &str, is_folder: bool) -> Option<&'static PlatformRecord> {
    let extension = file_path.rsplit('.').next().unwrap_or("");
    let first_segment = file_path.split(['/', '\\']).next().unwrap_or("");

    PLATFORMS.iter().find(|record| {
        (is_folder || record.extensions.contains(&extension))
            && record.aliases.iter().any(|alias| first_segment.contains(alias))
    })
}

/// Whether a folder name looks like a ROM library folder.
pub fn is_rom_folder(folder_name: &str) -> bool {
    lookup_platform(folder_name, true).is_some()
}
