// The 391 predefined strings of Adobe Technical Note #5176, Appendix A.
use phf::phf_map;

pub(crate) const STANDARD_NAMES_LEN: u16 = 391;

pub(crate) fn get(sid: u16) -> Option<&'static str> {
    STANDARD_NAMES.get(usize::from(sid)).copied()
}

pub(crate) fn get_inverse(name: &str) -> Option<u16> {
    STANDARD_NAMES_INVERSE.get(name).copied()
}

static STANDARD_NAMES: [&str; 391] = [
    ".notdef",
    "space",
    "exclam",
    "quotedbl",
    "numbersign",
    "dollar",
    "percent",
    "ampersand",
    "quoteright",
    "parenleft",
    "parenright",
    "asterisk",
    "plus",
    "comma",
    "hyphen",
    "period",
    "slash",
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "colon",
    "semicolon",
    "less",
    "equal",
    "greater",
    "question",
    "at",
    "A",
    "B",
    "C",
    "D",
    "E",
    "F",
    "G",
    "H",
    "I",
    "J",
    "K",
    "L",
    "M",
    "N",
    "O",
    "P",
    "Q",
    "R",
    "S",
    "T",
    "U",
    "V",
    "W",
    "X",
    "Y",
    "Z",
    "bracketleft",
    "backslash",
    "bracketright",
    "asciicircum",
    "underscore",
    "quoteleft",
    "a",
    "b",
    "c",
    "d",
    "e",
    "f",
    "g",
    "h",
    "i",
    "j",
    "k",
    "l",
    "m",
    "n",
    "o",
    "p",
    "q",
    "r",
    "s",
    "t",
    "u",
    "v",
    "w",
    "x",
    "y",
    "z",
    "braceleft",
    "bar",
    "braceright",
    "asciitilde",
    "exclamdown",
    "cent",
    "sterling",
    "fraction",
    "yen",
    "florin",
    "section",
    "currency",
    "quotesingle",
    "quotedblleft",
    "guillemotleft",
    "guilsinglleft",
    "guilsinglright",
    "fi",
    "fl",
    "endash",
    "dagger",
    "daggerdbl",
    "periodcentered",
    "paragraph",
    "bullet",
    "quotesinglbase",
    "quotedblbase",
    "quotedblright",
    "guillemotright",
    "ellipsis",
    "perthousand",
    "questiondown",
    "grave",
    "acute",
    "circumflex",
    "tilde",
    "macron",
    "breve",
    "dotaccent",
    "dieresis",
    "ring",
    "cedilla",
    "hungarumlaut",
    "ogonek",
    "caron",
    "emdash",
    "AE",
    "ordfeminine",
    "Lslash",
    "Oslash",
    "OE",
    "ordmasculine",
    "ae",
    "dotlessi",
    "lslash",
    "oslash",
    "oe",
    "germandbls",
    "onesuperior",
    "logicalnot",
    "mu",
    "trademark",
    "Eth",
    "onehalf",
    "plusminus",
    "Thorn",
    "onequarter",
    "divide",
    "brokenbar",
    "degree",
    "thorn",
    "threequarters",
    "twosuperior",
    "registered",
    "minus",
    "eth",
    "multiply",
    "threesuperior",
    "copyright",
    "Aacute",
    "Acircumflex",
    "Adieresis",
    "Agrave",
    "Aring",
    "Atilde",
    "Ccedilla",
    "Eacute",
    "Ecircumflex",
    "Edieresis",
    "Egrave",
    "Iacute",
    "Icircumflex",
    "Idieresis",
    "Igrave",
    "Ntilde",
    "Oacute",
    "Ocircumflex",
    "Odieresis",
    "Ograve",
    "Otilde",
    "Scaron",
    "Uacute",
    "Ucircumflex",
    "Udieresis",
    "Ugrave",
    "Yacute",
    "Ydieresis",
    "Zcaron",
    "aacute",
    "acircumflex",
    "adieresis",
    "agrave",
    "aring",
    "atilde",
    "ccedilla",
    "eacute",
    "ecircumflex",
    "edieresis",
    "egrave",
    "iacute",
    "icircumflex",
    "idieresis",
    "igrave",
    "ntilde",
    "oacute",
    "ocircumflex",
    "odieresis",
    "ograve",
    "otilde",
    "scaron",
    "uacute",
    "ucircumflex",
    "udieresis",
    "ugrave",
    "yacute",
    "ydieresis",
    "zcaron",
    "exclamsmall",
    "Hungarumlautsmall",
    "dollaroldstyle",
    "dollarsuperior",
    "ampersandsmall",
    "Acutesmall",
    "parenleftsuperior",
    "parenrightsuperior",
    "twodotenleader",
    "onedotenleader",
    "zerooldstyle",
    "oneoldstyle",
    "twooldstyle",
    "threeoldstyle",
    "fouroldstyle",
    "fiveoldstyle",
    "sixoldstyle",
    "sevenoldstyle",
    "eightoldstyle",
    "nineoldstyle",
    "commasuperior",
    "threequartersemdash",
    "periodsuperior",
    "questionsmall",
    "asuperior",
    "bsuperior",
    "centsuperior",
    "dsuperior",
    "esuperior",
    "isuperior",
    "lsuperior",
    "msuperior",
    "nsuperior",
    "osuperior",
    "rsuperior",
    "ssuperior",
    "tsuperior",
    "ff",
    "ffi",
    "ffl",
    "parenleftinferior",
    "parenrightinferior",
    "Circumflexsmall",
    "hyphensuperior",
    "Gravesmall",
    "Asmall",
    "Bsmall",
    "Csmall",
    "Dsmall",
    "Esmall",
    "Fsmall",
    "Gsmall",
    "Hsmall",
    "Ismall",
    "Jsmall",
    "Ksmall",
    "Lsmall",
    "Msmall",
    "Nsmall",
    "Osmall",
    "Psmall",
    "Qsmall",
    "Rsmall",
    "Ssmall",
    "Tsmall",
    "Usmall",
    "Vsmall",
    "Wsmall",
    "Xsmall",
    "Ysmall",
    "Zsmall",
    "colonmonetary",
    "onefitted",
    "rupiah",
    "Tildesmall",
    "exclamdownsmall",
    "centoldstyle",
    "Lslashsmall",
    "Scaronsmall",
    "Zcaronsmall",
    "Dieresissmall",
    "Brevesmall",
    "Caronsmall",
    "Dotaccentsmall",
    "Macronsmall",
    "figuredash",
    "hypheninferior",
    "Ogoneksmall",
    "Ringsmall",
    "Cedillasmall",
    "questiondownsmall",
    "oneeighth",
    "threeeighths",
    "fiveeighths",
    "seveneighths",
    "onethird",
    "twothirds",
    "zerosuperior",
    "foursuperior",
    "fivesuperior",
    "sixsuperior",
    "sevensuperior",
    "eightsuperior",
    "ninesuperior",
    "zeroinferior",
    "oneinferior",
    "twoinferior",
    "threeinferior",
    "fourinferior",
    "fiveinferior",
    "sixinferior",
    "seveninferior",
    "eightinferior",
    "nineinferior",
    "centinferior",
    "dollarinferior",
    "periodinferior",
    "commainferior",
    "Agravesmall",
    "Aacutesmall",
    "Acircumflexsmall",
    "Atildesmall",
    "Adieresissmall",
    "Aringsmall",
    "AEsmall",
    "Ccedillasmall",
    "Egravesmall",
    "Eacutesmall",
    "Ecircumflexsmall",
    "Edieresissmall",
    "Igravesmall",
    "Iacutesmall",
    "Icircumflexsmall",
    "Idieresissmall",
    "Ethsmall",
    "Ntildesmall",
    "Ogravesmall",
    "Oacutesmall",
    "Ocircumflexsmall",
    "Otildesmall",
    "Odieresissmall",
    "OEsmall",
    "Oslashsmall",
    "Ugravesmall",
    "Uacutesmall",
    "Ucircumflexsmall",
    "Udieresissmall",
    "Yacutesmall",
    "Thornsmall",
    "Ydieresissmall",
    "001.000",
    "001.001",
    "001.002",
    "001.003",
    "Black",
    "Bold",
    "Book",
    "Light",
    "Medium",
    "Regular",
    "Roman",
    "Semibold",
];

static STANDARD_NAMES_INVERSE: phf::Map<&'static str, u16> = phf_map! {
    ".notdef" => 0_u16,
    "space" => 1_u16,
    "exclam" => 2_u16,
    "quotedbl" => 3_u16,
    "numbersign" => 4_u16,
    "dollar" => 5_u16,
    "percent" => 6_u16,
    "ampersand" => 7_u16,
    "quoteright" => 8_u16,
    "parenleft" => 9_u16,
    "parenright" => 10_u16,
    "asterisk" => 11_u16,
    "plus" => 12_u16,
    "comma" => 13_u16,
    "hyphen" => 14_u16,
    "period" => 15_u16,
    "slash" => 16_u16,
    "zero" => 17_u16,
    "one" => 18_u16,
    "two" => 19_u16,
    "three" => 20_u16,
    "four" => 21_u16,
    "five" => 22_u16,
    "six" => 23_u16,
    "seven" => 24_u16,
    "eight" => 25_u16,
    "nine" => 26_u16,
    "colon" => 27_u16,
    "semicolon" => 28_u16,
    "less" => 29_u16,
    "equal" => 30_u16,
    "greater" => 31_u16,
    "question" => 32_u16,
    "at" => 33_u16,
    "A" => 34_u16,
    "B" => 35_u16,
    "C" => 36_u16,
    "D" => 37_u16,
    "E" => 38_u16,
    "F" => 39_u16,
    "G" => 40_u16,
    "H" => 41_u16,
    "I" => 42_u16,
    "J" => 43_u16,
    "K" => 44_u16,
    "L" => 45_u16,
    "M" => 46_u16,
    "N" => 47_u16,
    "O" => 48_u16,
    "P" => 49_u16,
    "Q" => 50_u16,
    "R" => 51_u16,
    "S" => 52_u16,
    "T" => 53_u16,
    "U" => 54_u16,
    "V" => 55_u16,
    "W" => 56_u16,
    "X" => 57_u16,
    "Y" => 58_u16,
    "Z" => 59_u16,
    "bracketleft" => 60_u16,
    "backslash" => 61_u16,
    "bracketright" => 62_u16,
    "asciicircum" => 63_u16,
    "underscore" => 64_u16,
    "quoteleft" => 65_u16,
    "a" => 66_u16,
    "b" => 67_u16,
    "c" => 68_u16,
    "d" => 69_u16,
    "e" => 70_u16,
    "f" => 71_u16,
    "g" => 72_u16,
    "h" => 73_u16,
    "i" => 74_u16,
    "j" => 75_u16,
    "k" => 76_u16,
    "l" => 77_u16,
    "m" => 78_u16,
    "n" => 79_u16,
    "o" => 80_u16,
    "p" => 81_u16,
    "q" => 82_u16,
    "r" => 83_u16,
    "s" => 84_u16,
    "t" => 85_u16,
    "u" => 86_u16,
    "v" => 87_u16,
    "w" => 88_u16,
    "x" => 89_u16,
    "y" => 90_u16,
    "z" => 91_u16,
    "braceleft" => 92_u16,
    "bar" => 93_u16,
    "braceright" => 94_u16,
    "asciitilde" => 95_u16,
    "exclamdown" => 96_u16,
    "cent" => 97_u16,
    "sterling" => 98_u16,
    "fraction" => 99_u16,
    "yen" => 100_u16,
    "florin" => 101_u16,
    "section" => 102_u16,
    "currency" => 103_u16,
    "quotesingle" => 104_u16,
    "quotedblleft" => 105_u16,
    "guillemotleft" => 106_u16,
    "guilsinglleft" => 107_u16,
    "guilsinglright" => 108_u16,
    "fi" => 109_u16,
    "fl" => 110_u16,
    "endash" => 111_u16,
    "dagger" => 112_u16,
    "daggerdbl" => 113_u16,
    "periodcentered" => 114_u16,
    "paragraph" => 115_u16,
    "bullet" => 116_u16,
    "quotesinglbase" => 117_u16,
    "quotedblbase" => 118_u16,
    "quotedblright" => 119_u16,
    "guillemotright" => 120_u16,
    "ellipsis" => 121_u16,
    "perthousand" => 122_u16,
    "questiondown" => 123_u16,
    "grave" => 124_u16,
    "acute" => 125_u16,
    "circumflex" => 126_u16,
    "tilde" => 127_u16,
    "macron" => 128_u16,
    "breve" => 129_u16,
    "dotaccent" => 130_u16,
    "dieresis" => 131_u16,
    "ring" => 132_u16,
    "cedilla" => 133_u16,
    "hungarumlaut" => 134_u16,
    "ogonek" => 135_u16,
    "caron" => 136_u16,
    "emdash" => 137_u16,
    "AE" => 138_u16,
    "ordfeminine" => 139_u16,
    "Lslash" => 140_u16,
    "Oslash" => 141_u16,
    "OE" => 142_u16,
    "ordmasculine" => 143_u16,
    "ae" => 144_u16,
    "dotlessi" => 145_u16,
    "lslash" => 146_u16,
    "oslash" => 147_u16,
    "oe" => 148_u16,
    "germandbls" => 149_u16,
    "onesuperior" => 150_u16,
    "logicalnot" => 151_u16,
    "mu" => 152_u16,
    "trademark" => 153_u16,
    "Eth" => 154_u16,
    "onehalf" => 155_u16,
    "plusminus" => 156_u16,
    "Thorn" => 157_u16,
    "onequarter" => 158_u16,
    "divide" => 159_u16,
    "brokenbar" => 160_u16,
    "degree" => 161_u16,
    "thorn" => 162_u16,
    "threequarters" => 163_u16,
    "twosuperior" => 164_u16,
    "registered" => 165_u16,
    "minus" => 166_u16,
    "eth" => 167_u16,
    "multiply" => 168_u16,
    "threesuperior" => 169_u16,
    "copyright" => 170_u16,
    "Aacute" => 171_u16,
    "Acircumflex" => 172_u16,
    "Adieresis" => 173_u16,
    "Agrave" => 174_u16,
    "Aring" => 175_u16,
    "Atilde" => 176_u16,
    "Ccedilla" => 177_u16,
    "Eacute" => 178_u16,
    "Ecircumflex" => 179_u16,
    "Edieresis" => 180_u16,
    "Egrave" => 181_u16,
    "Iacute" => 182_u16,
    "Icircumflex" => 183_u16,
    "Idieresis" => 184_u16,
    "Igrave" => 185_u16,
    "Ntilde" => 186_u16,
    "Oacute" => 187_u16,
    "Ocircumflex" => 188_u16,
    "Odieresis" => 189_u16,
    "Ograve" => 190_u16,
    "Otilde" => 191_u16,
    "Scaron" => 192_u16,
    "Uacute" => 193_u16,
    "Ucircumflex" => 194_u16,
    "Udieresis" => 195_u16,
    "Ugrave" => 196_u16,
    "Yacute" => 197_u16,
    "Ydieresis" => 198_u16,
    "Zcaron" => 199_u16,
    "aacute" => 200_u16,
    "acircumflex" => 201_u16,
    "adieresis" => 202_u16,
    "agrave" => 203_u16,
    "aring" => 204_u16,
    "atilde" => 205_u16,
    "ccedilla" => 206_u16,
    "eacute" => 207_u16,
    "ecircumflex" => 208_u16,
    "edieresis" => 209_u16,
    "egrave" => 210_u16,
    "iacute" => 211_u16,
    "icircumflex" => 212_u16,
    "idieresis" => 213_u16,
    "igrave" => 214_u16,
    "ntilde" => 215_u16,
    "oacute" => 216_u16,
    "ocircumflex" => 217_u16,
    "odieresis" => 218_u16,
    "ograve" => 219_u16,
    "otilde" => 220_u16,
    "scaron" => 221_u16,
    "uacute" => 222_u16,
    "ucircumflex" => 223_u16,
    "udieresis" => 224_u16,
    "ugrave" => 225_u16,
    "yacute" => 226_u16,
    "ydieresis" => 227_u16,
    "zcaron" => 228_u16,
    "exclamsmall" => 229_u16,
    "Hungarumlautsmall" => 230_u16,
    "dollaroldstyle" => 231_u16,
    "dollarsuperior" => 232_u16,
    "ampersandsmall" => 233_u16,
    "Acutesmall" => 234_u16,
    "parenleftsuperior" => 235_u16,
    "parenrightsuperior" => 236_u16,
    "twodotenleader" => 237_u16,
    "onedotenleader" => 238_u16,
    "zerooldstyle" => 239_u16,
    "oneoldstyle" => 240_u16,
    "twooldstyle" => 241_u16,
    "threeoldstyle" => 242_u16,
    "fouroldstyle" => 243_u16,
    "fiveoldstyle" => 244_u16,
    "sixoldstyle" => 245_u16,
    "sevenoldstyle" => 246_u16,
    "eightoldstyle" => 247_u16,
    "nineoldstyle" => 248_u16,
    "commasuperior" => 249_u16,
    "threequartersemdash" => 250_u16,
    "periodsuperior" => 251_u16,
    "questionsmall" => 252_u16,
    "asuperior" => 253_u16,
    "bsuperior" => 254_u16,
    "centsuperior" => 255_u16,
    "dsuperior" => 256_u16,
    "esuperior" => 257_u16,
    "isuperior" => 258_u16,
    "lsuperior" => 259_u16,
    "msuperior" => 260_u16,
    "nsuperior" => 261_u16,
    "osuperior" => 262_u16,
    "rsuperior" => 263_u16,
    "ssuperior" => 264_u16,
    "tsuperior" => 265_u16,
    "ff" => 266_u16,
    "ffi" => 267_u16,
    "ffl" => 268_u16,
    "parenleftinferior" => 269_u16,
    "parenrightinferior" => 270_u16,
    "Circumflexsmall" => 271_u16,
    "hyphensuperior" => 272_u16,
    "Gravesmall" => 273_u16,
    "Asmall" => 274_u16,
    "Bsmall" => 275_u16,
    "Csmall" => 276_u16,
    "Dsmall" => 277_u16,
    "Esmall" => 278_u16,
    "Fsmall" => 279_u16,
    "Gsmall" => 280_u16,
    "Hsmall" => 281_u16,
    "Ismall" => 282_u16,
    "Jsmall" => 283_u16,
    "Ksmall" => 284_u16,
    "Lsmall" => 285_u16,
    "Msmall" => 286_u16,
    "Nsmall" => 287_u16,
    "Osmall" => 288_u16,
    "Psmall" => 289_u16,
    "Qsmall" => 290_u16,
    "Rsmall" => 291_u16,
    "Ssmall" => 292_u16,
    "Tsmall" => 293_u16,
    "Usmall" => 294_u16,
    "Vsmall" => 295_u16,
    "Wsmall" => 296_u16,
    "Xsmall" => 297_u16,
    "Ysmall" => 298_u16,
    "Zsmall" => 299_u16,
    "colonmonetary" => 300_u16,
    "onefitted" => 301_u16,
    "rupiah" => 302_u16,
    "Tildesmall" => 303_u16,
    "exclamdownsmall" => 304_u16,
    "centoldstyle" => 305_u16,
    "Lslashsmall" => 306_u16,
    "Scaronsmall" => 307_u16,
    "Zcaronsmall" => 308_u16,
    "Dieresissmall" => 309_u16,
    "Brevesmall" => 310_u16,
    "Caronsmall" => 311_u16,
    "Dotaccentsmall" => 312_u16,
    "Macronsmall" => 313_u16,
    "figuredash" => 314_u16,
    "hypheninferior" => 315_u16,
    "Ogoneksmall" => 316_u16,
    "Ringsmall" => 317_u16,
    "Cedillasmall" => 318_u16,
    "questiondownsmall" => 319_u16,
    "oneeighth" => 320_u16,
    "threeeighths" => 321_u16,
    "fiveeighths" => 322_u16,
    "seveneighths" => 323_u16,
    "onethird" => 324_u16,
    "twothirds" => 325_u16,
    "zerosuperior" => 326_u16,
    "foursuperior" => 327_u16,
    "fivesuperior" => 328_u16,
    "sixsuperior" => 329_u16,
    "sevensuperior" => 330_u16,
    "eightsuperior" => 331_u16,
    "ninesuperior" => 332_u16,
    "zeroinferior" => 333_u16,
    "oneinferior" => 334_u16,
    "twoinferior" => 335_u16,
    "threeinferior" => 336_u16,
    "fourinferior" => 337_u16,
    "fiveinferior" => 338_u16,
    "sixinferior" => 339_u16,
    "seveninferior" => 340_u16,
    "eightinferior" => 341_u16,
    "nineinferior" => 342_u16,
    "centinferior" => 343_u16,
    "dollarinferior" => 344_u16,
    "periodinferior" => 345_u16,
    "commainferior" => 346_u16,
    "Agravesmall" => 347_u16,
    "Aacutesmall" => 348_u16,
    "Acircumflexsmall" => 349_u16,
    "Atildesmall" => 350_u16,
    "Adieresissmall" => 351_u16,
    "Aringsmall" => 352_u16,
    "AEsmall" => 353_u16,
    "Ccedillasmall" => 354_u16,
    "Egravesmall" => 355_u16,
    "Eacutesmall" => 356_u16,
    "Ecircumflexsmall" => 357_u16,
    "Edieresissmall" => 358_u16,
    "Igravesmall" => 359_u16,
    "Iacutesmall" => 360_u16,
    "Icircumflexsmall" => 361_u16,
    "Idieresissmall" => 362_u16,
    "Ethsmall" => 363_u16,
    "Ntildesmall" => 364_u16,
    "Ogravesmall" => 365_u16,
    "Oacutesmall" => 366_u16,
    "Ocircumflexsmall" => 367_u16,
    "Otildesmall" => 368_u16,
    "Odieresissmall" => 369_u16,
    "OEsmall" => 370_u16,
    "Oslashsmall" => 371_u16,
    "Ugravesmall" => 372_u16,
    "Uacutesmall" => 373_u16,
    "Ucircumflexsmall" => 374_u16,
    "Udieresissmall" => 375_u16,
    "Yacutesmall" => 376_u16,
    "Thornsmall" => 377_u16,
    "Ydieresissmall" => 378_u16,
    "001.000" => 379_u16,
    "001.001" => 380_u16,
    "001.002" => 381_u16,
    "001.003" => 382_u16,
    "Black" => 383_u16,
    "Bold" => 384_u16,
    "Book" => 385_u16,
    "Light" => 386_u16,
    "Medium" => 387_u16,
    "Regular" => 388_u16,
    "Roman" => 389_u16,
    "Semibold" => 390_u16
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_standard_names() {
        assert_eq!(get(0), Some(".notdef"));
        assert_eq!(get(34), Some("A"));
        assert_eq!(get(390), Some("Semibold"));
        assert_eq!(get(391), None);
    }

    #[test]
    fn inverse_is_consistent() {
        for sid in 0..STANDARD_NAMES_LEN {
            let name = get(sid).unwrap();
            assert_eq!(get_inverse(name), Some(sid));
        }

        assert_eq!(get_inverse("notaglyph"), None);
    }
}
